// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use wss_rs::{
    string_from_secret, string_to_secret, BroadcastDecision, GroupParameters,
    Participant, RelayBehavior, TransmissionPolicy,
};

/// Routes `RUST_LOG` filtered events to the test output. Idempotent.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup(
    n: usize,
    policy: TransmissionPolicy,
) -> (Participant, Vec<Participant>) {
    let group = GroupParameters::new();
    let dealer = Participant::new(group.clone(), 0, policy);
    let players = (1..=n)
        .map(|id| Participant::new(group.clone(), id, policy))
        .collect();
    (dealer, players)
}

#[test]
fn test_secret_str_utf8() {
    let secret_message = "Hello WSS.";
    let secret = string_to_secret(secret_message);
    assert_eq!(string_from_secret(&secret), secret_message);
}

#[test]
fn test_wss_share_direct() {
    init_logging();
    let mut rng = StdRng::from_seed([1u8; 32]);
    let (mut dealer, mut players) = setup(5, TransmissionPolicy::Direct);
    let secret = string_to_secret("AVerySecretMessage!");

    let messages = dealer
        .wss_share(&mut rng, &secret, &mut players, 5)
        .unwrap();
    assert_eq!(messages, 48);
    assert_eq!(dealer.decisions.len(), 12);
    // each broadcast reaches the intermediary and the receiver of its round
    let observed: usize =
        players.iter().map(|p| p.observed_broadcasts.len()).sum();
    assert_eq!(observed, 2 * dealer.decisions.len());
    for (round, decision) in &dealer.decisions {
        for id in [round.intermediary, round.receiver] {
            assert!(players[id - 1]
                .observed_broadcasts
                .contains(&(*round, decision.clone())));
        }
    }
    for player in &players[..4] {
        assert_eq!(player.output.len(), 6);
        assert!(player
            .output
            .iter()
            .all(|triple| triple.is_consistent(dealer.group())));
    }
    assert!(players[4].output.is_empty());
}

#[test]
fn test_wss_share_checked_relay() {
    init_logging();
    let mut rng = StdRng::from_seed([2u8; 32]);
    let (mut dealer, mut players) = setup(5, TransmissionPolicy::CheckedRelay);
    let secret = string_to_secret("AVerySecretMessage!");

    let messages = dealer
        .wss_share(&mut rng, &secret, &mut players, 5)
        .unwrap();
    assert_eq!(messages, 336);
    assert!(dealer.swc.rejected.is_empty());
    assert!(dealer
        .decisions
        .iter()
        .all(|(_, decision)| *decision == BroadcastDecision::Accept));
}

#[test]
fn test_wss_share_with_tampering_intermediary() {
    init_logging();
    let mut rng = StdRng::from_seed([3u8; 32]);
    let (mut dealer, mut players) = setup(4, TransmissionPolicy::CheckedRelay);
    players[0].set_relay_behavior(RelayBehavior::Tamper(BigInt::from(7)));

    let messages = dealer
        .wss_share(&mut rng, &BigInt::from(1234567890), &mut players, 4)
        .unwrap();
    // cost does not depend on the outcome of the checks
    assert_eq!(messages, 28 * 3 * 2);

    // the tampering player only relays its own challenges
    assert_eq!(dealer.swc.rejected, vec![1, 1]);
    for (round, decision) in &dealer.decisions {
        if round.intermediary == 1 {
            assert!(matches!(decision, BroadcastDecision::RevealShare { .. }));
        } else {
            assert_eq!(*decision, BroadcastDecision::Accept);
        }
    }
    for player in &players[..3] {
        assert_eq!(player.output.len(), 4);
        assert!(player
            .output
            .iter()
            .all(|triple| triple.is_consistent(dealer.group())));
    }
}

#[test]
fn test_distribute_extract_verify() {
    init_logging();
    let mut rng = StdRng::from_seed([4u8; 32]);
    let group = GroupParameters::new();
    let mut dealer =
        Participant::new(group.clone(), 0, TransmissionPolicy::Direct);
    dealer.initialize(&mut rng);
    let mut players: Vec<Participant> = (1..=3)
        .map(|id| Participant::new(group.clone(), id, TransmissionPolicy::Direct))
        .collect();
    for player in players.iter_mut() {
        player.initialize(&mut rng);
    }
    let publickeys: Vec<BigInt> =
        players.iter().map(|p| p.publickey.clone()).collect();

    let secret = string_to_secret("Hello WSS.");
    let shares_box = dealer
        .distribute_secret(&mut rng, &secret, &publickeys, 3)
        .unwrap();

    for player in &players {
        assert!(player.verify_distribution_shares(&shares_box));
    }

    let share_boxes: Vec<_> = players
        .iter()
        .map(|p| {
            p.extract_secret_share(&mut rng, &shares_box, &p.privatekey)
                .unwrap()
        })
        .collect();

    assert!(players[0].verify_share(
        &share_boxes[1],
        &shares_box,
        &players[1].publickey
    ));
    assert!(players[1].verify_share(
        &share_boxes[2],
        &shares_box,
        &players[2].publickey
    ));
    assert!(players[2].verify_share(
        &share_boxes[0],
        &shares_box,
        &share_boxes[0].publickey
    ));
    assert!(!players[2].verify_share(
        &share_boxes[0],
        &shares_box,
        &players[1].publickey
    ));
}
