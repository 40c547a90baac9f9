// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Runs `WSS_Share` with `n = 5, 50, 100, ...` players (threshold `n`) up to
//! the bound given as first argument (default 100) and prints message counts
//! and elapsed time for both transmission policies.
//!
//! `RUST_LOG=wss_rs=debug cargo run --example wss_experiment -- 150`

use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wss_rs::{
    string_to_secret, GroupParameters, Participant, TransmissionPolicy,
};

fn run(group: &Arc<GroupParameters>, n: usize, policy: TransmissionPolicy) {
    let mut rng = rand::thread_rng();
    let mut dealer = Participant::new(group.clone(), 0, policy);
    let mut players: Vec<Participant> = (1..=n)
        .map(|id| Participant::new(group.clone(), id, policy))
        .collect();
    let secret = string_to_secret("AVerySecretMessage!");

    let start = Instant::now();
    match dealer.wss_share(&mut rng, &secret, &mut players, n) {
        Ok(messages) => println!(
            "{:?}: n = {}, messages = {}, elapsed = {:?}",
            policy,
            n,
            messages,
            start.elapsed()
        ),
        Err(err) => eprintln!("{:?}: n = {} failed: {}", policy, n, err),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .compact()
        .init();

    let bound = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(100);

    let group = GroupParameters::new();
    let sizes = std::iter::once(5).chain((50..=bound).step_by(50));
    for n in sizes.take_while(|n| *n <= bound) {
        run(&group, n, TransmissionPolicy::Direct);
        run(&group, n, TransmissionPolicy::CheckedRelay);
    }
}
