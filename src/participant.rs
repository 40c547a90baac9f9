// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use num_bigint::BigInt;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::info;

use crate::errors::{Result, WssError};
use crate::group::GroupParameters;
use crate::message::{
    BroadcastDecision, IntermediarySetup, PrivateMessage, ReceiverSetup,
    RoundId, ValidateView,
};
use crate::polynomial::Polynomial;
use crate::sharebox::{DistributionSharesBox, ShareBox};
use crate::swc::{RelayBehavior, SwcState, TransmissionPolicy};
use crate::witness::AlphaConsistent;

/// What the dealer remembers about one `(intermediary, receiver)` pair
/// between `ICSetup` and `ICValidate`.
#[derive(Debug, Clone, Default)]
pub struct DealerRound {
    pub share: BigInt,
    pub first_alpha: AlphaConsistent,
    pub prime_alpha: AlphaConsistent,
    /// Challenge received from the intermediary, `None` until it arrives.
    pub validate_d: Option<BigInt>,
}

/// A participant represents one party in the secret sharing scheme. The participant can share a secret among a group of other participants and it is then called the "dealer".
/// The other participants take the roles of intermediary and receiver in the Information Checking rounds and collect the validated witness triples in `output`.
#[derive(Debug, Clone)]
pub struct Participant {
    pub(crate) group: Arc<GroupParameters>,
    pub id: usize,
    pub policy: TransmissionPolicy,
    pub privatekey: BigInt,
    pub publickey: BigInt,

    // dealer role
    pub rounds: BTreeMap<RoundId, DealerRound>,
    /// Broadcast transcript of the rounds this participant dealt.
    pub decisions: Vec<(RoundId, BroadcastDecision)>,

    /// Broadcasts received as intermediary or receiver of another dealer's round.
    pub observed_broadcasts: Vec<(RoundId, BroadcastDecision)>,

    // intermediary role
    pub ic_setup_as_intermediary: BTreeMap<RoundId, IntermediarySetup>,
    pub d: BTreeMap<RoundId, BigInt>,

    // receiver role
    pub ic_setup_as_receiver: BTreeMap<RoundId, ReceiverSetup>,
    pub ic_validate_as_receiver: BTreeMap<RoundId, ValidateView>,

    /// Accepted `(s, y, z)` triples, in validation order.
    pub output: Vec<AlphaConsistent>,
    pub swc: SwcState,
}

impl Participant {
    /// Create a participant with id `id` sharing `group` with every other party.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use wss_rs::{GroupParameters, Participant, TransmissionPolicy};
    /// let group = GroupParameters::new();
    /// let dealer = Participant::new(group, 0, TransmissionPolicy::Direct);
    /// ```
    pub fn new(
        group: Arc<GroupParameters>,
        id: usize,
        policy: TransmissionPolicy,
    ) -> Self {
        Participant {
            group,
            id,
            policy,
            privatekey: BigInt::default(),
            publickey: BigInt::default(),
            rounds: BTreeMap::new(),
            decisions: Vec::new(),
            observed_broadcasts: Vec::new(),
            ic_setup_as_intermediary: BTreeMap::new(),
            d: BTreeMap::new(),
            ic_setup_as_receiver: BTreeMap::new(),
            ic_validate_as_receiver: BTreeMap::new(),
            output: Vec::new(),
            swc: SwcState::default(),
        }
    }

    /// Generates the participant's key pair.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.privatekey = self.group.generate_private_key(rng);
        self.publickey = self.group.generate_public_key(&self.privatekey);
    }

    pub fn group(&self) -> &Arc<GroupParameters> {
        &self.group
    }

    /// Sets what this participant does with messages it relays in SendWithCheck.
    pub fn set_relay_behavior(&mut self, behavior: RelayBehavior) {
        self.swc.relay.behavior = behavior;
    }

    /// Private channel: stores `message` in the slot of `round` it addresses.
    pub fn deliver(&mut self, round: RoundId, message: PrivateMessage) {
        match message {
            PrivateMessage::IntermediarySetup(setup) => {
                self.ic_setup_as_intermediary.insert(round, setup);
            }
            PrivateMessage::ReceiverSetup(setup) => {
                self.ic_setup_as_receiver.insert(round, setup);
            }
            PrivateMessage::Challenge(d) => {
                if let Some(dealer_round) = self.rounds.get_mut(&round) {
                    dealer_round.validate_d = Some(d);
                }
            }
            PrivateMessage::Validate(view) => {
                self.ic_validate_as_receiver.insert(round, view);
            }
        }
    }

    /// Shares `secret` among `players` with a fresh random polynomial of
    /// degree `threshold` and returns the number of exchanged messages.
    ///
    /// Only the first `threshold - 1` players take part in the sharing.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use wss_rs::{string_to_secret, GroupParameters, Participant, TransmissionPolicy};
    ///
    /// let mut rng = StdRng::from_seed([0u8; 32]);
    /// let group = GroupParameters::new();
    /// let mut dealer = Participant::new(group.clone(), 0, TransmissionPolicy::Direct);
    /// let mut players: Vec<Participant> = (1..=5)
    ///     .map(|id| Participant::new(group.clone(), id, TransmissionPolicy::Direct))
    ///     .collect();
    ///
    /// let secret = string_to_secret("AVerySecretMessage!");
    /// let messages = dealer.wss_share(&mut rng, &secret, &mut players, 5).unwrap();
    /// assert_eq!(messages, 48);
    /// ```
    pub fn wss_share<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        secret: &BigInt,
        players: &mut [Participant],
        threshold: usize,
    ) -> Result<usize> {
        check_threshold(threshold, players.len())?;
        let polynomial =
            Polynomial::random(rng, threshold, secret, &self.group.q)?;
        self.wss_share_with_polynomial(rng, players, threshold, &polynomial)
    }

    /// `wss_share` with a caller supplied polynomial.
    pub fn wss_share_with_polynomial<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        players: &mut [Participant],
        threshold: usize,
        polynomial: &Polynomial,
    ) -> Result<usize> {
        check_threshold(threshold, players.len())?;
        let seated = threshold.saturating_sub(1);
        let players = &mut players[..seated];

        let mut ids = BTreeSet::new();
        ids.insert(self.id);
        for player in players.iter() {
            if !ids.insert(player.id) {
                return Err(WssError::DuplicateParticipant(player.id));
            }
        }

        // Round 1
        // calculate s_i with polynomial
        let shares: Vec<BigInt> = (1..=seated)
            .map(|position| polynomial.get_value(&BigInt::from(position as u64)))
            .collect();

        let mut messages = 0;
        // send each player's share using ICSetup
        for i in 0..seated {
            for j in 0..seated {
                if i != j {
                    let (intermediary, receiver) = pair_mut(players, i, j);
                    messages +=
                        self.ic_setup(rng, intermediary, receiver, &shares[i]);
                }
            }
        }

        // Round 2-5
        for i in 0..seated {
            for j in 0..seated {
                if i != j {
                    let (intermediary, receiver) = pair_mut(players, i, j);
                    messages += self.ic_validate(
                        rng,
                        intermediary,
                        receiver,
                        &shares[i],
                    )?;
                }
            }
        }

        info!(
            dealer = self.id,
            threshold,
            messages,
            "WSS sharing phase completed"
        );
        Ok(messages)
    }

    /// Takes a secret as input and returns the distribution shares box which is going to be submitted to all the participants the secret is going to be shared with.
    /// Those participants are specified by their public keys. They use the distribution shares box to verify that the shares are correct.
    ///
    /// - Requires: `threshold` <= number of public keys
    pub fn distribute_secret<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        secret: &BigInt,
        publickeys: &[BigInt],
        threshold: usize,
    ) -> Result<DistributionSharesBox> {
        crate::distribution::distribute_secret(
            &self.group,
            rng,
            secret,
            publickeys,
            threshold,
        )
    }

    /// Extracts the share addressed to `private_key` from the box, boxed with a proof of correct decryption.
    /// Returns `None` if the box holds no share for the matching public key.
    pub fn extract_secret_share<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        shares_box: &DistributionSharesBox,
        private_key: &BigInt,
    ) -> Option<ShareBox> {
        crate::distribution::extract_secret_share(
            &self.group,
            rng,
            shares_box,
            private_key,
        )
    }

    /// Verifies that the shares the distribution shares box consists are consistent.
    pub fn verify_distribution_shares(
        &self,
        distribute_sharesbox: &DistributionSharesBox,
    ) -> bool {
        self.group.verify_distribution_shares(distribute_sharesbox)
    }

    /// Verifies if the share in the share box was decrypted correctly by the participant owning `publickey`.
    pub fn verify_share(
        &self,
        sharebox: &ShareBox,
        distribution_sharebox: &DistributionSharesBox,
        publickey: &BigInt,
    ) -> bool {
        self.group
            .verify_share(sharebox, distribution_sharebox, publickey)
    }
}

fn check_threshold(threshold: usize, players: usize) -> Result<()> {
    if threshold > players {
        return Err(WssError::ThresholdExceedsPlayers { threshold, players });
    }
    Ok(())
}

/// Mutable references to two distinct elements.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs distinct indices");
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::string_to_secret;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

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
    fn test_threshold_exceeding_players_is_rejected() {
        let mut rng = StdRng::from_seed([31u8; 32]);
        let (mut dealer, mut players) = setup(3, TransmissionPolicy::Direct);
        let result =
            dealer.wss_share(&mut rng, &BigInt::from(7), &mut players, 4);
        assert_eq!(
            result,
            Err(WssError::ThresholdExceedsPlayers {
                threshold: 4,
                players: 3
            })
        );
        assert!(dealer.rounds.is_empty());
        assert!(players.iter().all(|p| p.output.is_empty()));
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let mut rng = StdRng::from_seed([32u8; 32]);
        let (mut dealer, mut players) = setup(3, TransmissionPolicy::Direct);
        let result =
            dealer.wss_share(&mut rng, &BigInt::from(7), &mut players, 0);
        assert_eq!(result, Err(WssError::DegreeTooSmall(0)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut rng = StdRng::from_seed([33u8; 32]);
        let (mut dealer, mut players) = setup(4, TransmissionPolicy::Direct);
        players[2].id = players[0].id;
        let result =
            dealer.wss_share(&mut rng, &BigInt::from(7), &mut players, 4);
        assert_eq!(result, Err(WssError::DuplicateParticipant(1)));
    }

    #[test]
    fn test_message_counts() {
        let secret = string_to_secret("AVerySecretMessage!");
        for threshold in 1..=5usize {
            let pairs = threshold.saturating_sub(1) * threshold.saturating_sub(2);

            let mut rng = StdRng::from_seed([34u8; 32]);
            let (mut dealer, mut players) =
                setup(threshold, TransmissionPolicy::Direct);
            let direct = dealer
                .wss_share(&mut rng, &secret, &mut players, threshold)
                .unwrap();
            assert_eq!(direct, 4 * pairs);

            let (mut dealer, mut players) =
                setup(threshold, TransmissionPolicy::CheckedRelay);
            let checked = dealer
                .wss_share(&mut rng, &secret, &mut players, threshold)
                .unwrap();
            assert_eq!(checked, 28 * pairs);
        }
    }

    #[test]
    fn test_only_first_threshold_minus_one_players_participate() {
        let mut rng = StdRng::from_seed([35u8; 32]);
        let (mut dealer, mut players) = setup(7, TransmissionPolicy::Direct);
        dealer
            .wss_share(&mut rng, &BigInt::from(99), &mut players, 4)
            .unwrap();
        for player in &players[..3] {
            assert_eq!(player.output.len(), 2 * (4 - 2));
        }
        for player in &players[3..] {
            assert!(player.output.is_empty());
            assert!(player.ic_setup_as_intermediary.is_empty());
            assert!(player.ic_setup_as_receiver.is_empty());
        }
    }

    #[test]
    fn test_honest_sharing_outputs_polynomial_shares() {
        let mut rng = StdRng::from_seed([36u8; 32]);
        let threshold = 5;
        let (mut dealer, mut players) =
            setup(threshold, TransmissionPolicy::Direct);
        let secret = string_to_secret("AVerySecretMessage!");
        let polynomial =
            Polynomial::random(&mut rng, threshold, &secret, &dealer.group.q)
                .unwrap();
        dealer
            .wss_share_with_polynomial(
                &mut rng,
                &mut players,
                threshold,
                &polynomial,
            )
            .unwrap();

        assert!(dealer
            .decisions
            .iter()
            .all(|(_, decision)| *decision == BroadcastDecision::Accept));

        let shares: Vec<BigInt> = (1..threshold as u64)
            .map(|position| polynomial.get_value(&BigInt::from(position)))
            .collect();
        for (k, player) in players[..threshold - 1].iter().enumerate() {
            assert_eq!(player.output.len(), 2 * (threshold - 2));
            assert!(player
                .output
                .iter()
                .all(|triple| triple.is_consistent(&dealer.group)));
            // as intermediary it keeps its own share once per receiver
            let own = player
                .output
                .iter()
                .filter(|triple| triple.x == shares[k])
                .count();
            assert_eq!(own, threshold - 2);
            // as receiver it holds every other share exactly once
            for (m, share) in shares.iter().enumerate() {
                if m != k {
                    let seen = player
                        .output
                        .iter()
                        .filter(|triple| triple.x == *share)
                        .count();
                    assert_eq!(seen, 1);
                }
            }
        }
    }

    #[test]
    fn test_checked_relay_honest_run_has_no_rejections() {
        let mut rng = StdRng::from_seed([37u8; 32]);
        let (mut dealer, mut players) =
            setup(4, TransmissionPolicy::CheckedRelay);
        dealer
            .wss_share(&mut rng, &BigInt::from(1234567890), &mut players, 4)
            .unwrap();
        assert!(dealer.swc.rejected.is_empty());
        assert!(players.iter().all(|p| p.swc.rejected.is_empty()));
        assert!(dealer
            .decisions
            .iter()
            .all(|(_, decision)| *decision == BroadcastDecision::Accept));
    }

    #[test]
    fn test_pair_mut() {
        let mut items = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        assert_eq!((*a, *b), (3, 1));
        let (a, b) = pair_mut(&mut items, 0, 1);
        assert_eq!((*a, *b), (1, 2));
    }
}
