// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Information Checking: `ICSetup` and `ICValidate`.
//!
//! The dealer `D` (`self`) hands the intermediary `I` a share `s` together
//! with an alpha-consistent witness, and the receiver `R` only the tags.
//! In `ICValidate` the intermediary challenges the dealer with a random `d`,
//! the dealer tells the receiver `(d, s' + d*s, y' + d*y)` and the three
//! views are compared in public. A disagreement never aborts the round:
//!
//! - `I`'s view differs from `D`'s: `D` reveals `(s, y)`, `R` recomputes `z`.
//! - only `R` disagrees: `D` reveals `(z, alpha)`, `I` recomputes `y`.

use num_bigint::BigInt;
use rand::Rng;
use tracing::{debug, warn};

use crate::errors::{Result, WssError};
use crate::message::{
    BroadcastDecision, IntermediarySetup, PrivateMessage, ReceiverSetup,
    RoundId, ValidateView,
};
use crate::participant::{DealerRound, Participant};
use crate::swc::{send_with_check, TransmissionPolicy};
use crate::util::random_below;
use crate::witness::AlphaConsistent;

impl Participant {
    fn round_id(&self, intermediary: &Participant, receiver: &Participant) -> RoundId {
        RoundId {
            dealer: self.id,
            intermediary: intermediary.id,
            receiver: receiver.id,
        }
    }

    /// ICSetup: returns the number of exchanged messages.
    pub fn ic_setup<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        intermediary: &mut Participant,
        receiver: &mut Participant,
        s: &BigInt,
    ) -> usize {
        let round = self.round_id(intermediary, receiver);
        let first_alpha = AlphaConsistent::with_x(rng, &self.group, s.clone());
        let prime_alpha = AlphaConsistent::new(rng, &self.group);

        let to_intermediary = PrivateMessage::IntermediarySetup(IntermediarySetup {
            s: first_alpha.x.clone(),
            s_pr: prime_alpha.x.clone(),
            y: first_alpha.y.clone(),
            y_pr: prime_alpha.y.clone(),
            z: first_alpha.z.clone(),
            z_pr: prime_alpha.z.clone(),
        });
        let to_receiver = PrivateMessage::ReceiverSetup(ReceiverSetup {
            alpha: self.group.alpha.clone(),
            z: first_alpha.z.clone(),
            z_pr: prime_alpha.z.clone(),
        });

        self.rounds.insert(
            round,
            DealerRound {
                share: s.clone(),
                first_alpha,
                prime_alpha,
                validate_d: None,
            },
        );

        //SEND ON PRIVATE CHANNEL
        let mut messages = self.send_private(rng, intermediary, round, to_intermediary);
        //SEND ON PRIVATE CHANNEL
        messages += self.send_private(rng, receiver, round, to_receiver);
        messages
    }

    /// ICValidate: returns the number of exchanged messages.
    ///
    /// Fails if no `ICSetup` ran for this pair, or ran with another share.
    pub fn ic_validate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        intermediary: &mut Participant,
        receiver: &mut Participant,
        s: &BigInt,
    ) -> Result<usize> {
        let round = self.round_id(intermediary, receiver);
        let dealer_round = self.rounds.get(&round).ok_or_else(|| missing_setup(round))?;
        if dealer_round.share != *s {
            return Err(WssError::ShareMismatch {
                intermediary: round.intermediary,
                receiver: round.receiver,
            });
        }

        let d = intermediary.choose_d(rng, round);
        //SEND ON PRIVATE CHANNEL
        let mut messages =
            self.receive_private(rng, intermediary, round, PrivateMessage::Challenge(d));

        let dealer_round = self.rounds.get(&round).ok_or_else(|| missing_setup(round))?;
        let first_alpha = dealer_round.first_alpha.clone();
        let challenge_received = dealer_round.validate_d.is_some();
        let validate_d = dealer_round.validate_d.clone().unwrap_or_default();
        let d_view = ValidateView::compute(
            &validate_d,
            &dealer_round.first_alpha.x,
            &dealer_round.prime_alpha.x,
            &dealer_round.first_alpha.y,
            &dealer_round.prime_alpha.y,
        );
        //SEND ON PRIVATE CHANNEL
        messages += self.send_private(
            rng,
            receiver,
            round,
            PrivateMessage::Validate(d_view.clone()),
        );

        //DISTRIBUTE ON PUBLIC BROADCAST CHANNEL
        // the receiver's verdict, the intermediary's d and setup are public from here on
        let r_reject = !receiver.check_alpha_consistency(&round);
        let i_view = intermediary.intermediary_view(&round);

        // a dealer that never got the challenge cannot vouch for the intermediary
        let first_conflict = !challenge_received || i_view.as_ref() != Some(&d_view);
        let second_conflict = receiver.ic_validate_as_receiver.get(&round)
            != Some(&d_view)
            || (!first_conflict && r_reject);

        let decision = if !(first_conflict || second_conflict) {
            BroadcastDecision::Accept
        } else if first_conflict {
            debug!(?round, "intermediary view conflicts with the dealer's");
            BroadcastDecision::RevealShare {
                x: first_alpha.x.clone(),
                y: first_alpha.y.clone(),
            }
        } else {
            debug!(?round, r_reject, "receiver disputes the dealer's view");
            BroadcastDecision::RevealTag {
                z: first_alpha.z.clone(),
                alpha: self.group.alpha.clone(),
            }
        };

        intermediary
            .observed_broadcasts
            .push((round, decision.clone()));
        receiver.observed_broadcasts.push((round, decision.clone()));

        match &decision {
            BroadcastDecision::Accept => {
                receiver.output.push(first_alpha.clone());
                intermediary.output.push(first_alpha);
            }
            BroadcastDecision::RevealShare { x, y } => {
                receiver.adjust_output_z(x, y);
                intermediary.output.push(first_alpha);
            }
            BroadcastDecision::RevealTag { z, .. } => {
                receiver.output.push(first_alpha.clone());
                intermediary.adjust_output_y(&first_alpha.x, z);
            }
        }
        self.decisions.push((round, decision));
        Ok(messages)
    }

    /// Picks the intermediary's challenge for `round`.
    pub fn choose_d<R: Rng + ?Sized>(&mut self, rng: &mut R, round: RoundId) -> BigInt {
        let d = random_below(rng, &self.group.challenge_bound);
        self.d.insert(round, d.clone());
        d
    }

    /// Receiver side: do the tags from `ICSetup` agree with the view the
    /// dealer sent in `ICValidate`? `false` if either message is missing.
    pub fn check_alpha_consistency(&self, round: &RoundId) -> bool {
        match (
            self.ic_setup_as_receiver.get(round),
            self.ic_validate_as_receiver.get(round),
        ) {
            (Some(setup), Some(view)) => {
                setup.alpha == self.group.alpha
                    && AlphaConsistent::is_alpha_consistent(
                        &self.group,
                        &view.s_pr_plus_ds,
                        &view.y_pr_plus_dy,
                        &(&setup.z_pr + &view.d * &setup.z),
                    )
            }
            _ => false,
        }
    }

    /// Intermediary side: the view recomputed from its own setup and challenge.
    pub fn intermediary_view(&self, round: &RoundId) -> Option<ValidateView> {
        let setup = self.ic_setup_as_intermediary.get(round)?;
        let d = self.d.get(round)?;
        Some(ValidateView::compute(
            d,
            &setup.s,
            &setup.s_pr,
            &setup.y,
            &setup.y_pr,
        ))
    }

    pub fn adjust_output_z(&mut self, x: &BigInt, y: &BigInt) {
        let z = AlphaConsistent::compute_z(&self.group, x, y);
        self.output.push(AlphaConsistent {
            x: x.clone(),
            y: y.clone(),
            z,
        });
    }

    pub fn adjust_output_y(&mut self, x: &BigInt, z: &BigInt) {
        let y = AlphaConsistent::compute_y(&self.group, x, z);
        self.output.push(AlphaConsistent {
            x: x.clone(),
            y,
            z: z.clone(),
        });
    }

    /// Private send from the dealer to `to`. Under `CheckedRelay` the dealer
    /// itself relays the message.
    fn send_private<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        to: &mut Participant,
        round: RoundId,
        message: PrivateMessage,
    ) -> usize {
        match self.policy {
            TransmissionPolicy::Direct => to.deliver(round, message),
            TransmissionPolicy::CheckedRelay => {
                let accepted = send_with_check(
                    rng,
                    &self.group.challenge_bound,
                    &message.digest(),
                    &mut self.swc.dealer,
                    &mut to.swc.recipient,
                    &mut self.swc.relay,
                );
                if accepted {
                    to.deliver(round, message);
                } else {
                    warn!(relay = self.id, recipient = to.id, ?round, "SendWithCheck rejected");
                    to.swc.rejected.push(self.id);
                }
            }
        }
        self.policy.cost()
    }

    /// Private send from `from` to the dealer, relayed by `from`.
    fn receive_private<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        from: &mut Participant,
        round: RoundId,
        message: PrivateMessage,
    ) -> usize {
        match self.policy {
            TransmissionPolicy::Direct => self.deliver(round, message),
            TransmissionPolicy::CheckedRelay => {
                let accepted = send_with_check(
                    rng,
                    &self.group.challenge_bound,
                    &message.digest(),
                    &mut self.swc.dealer,
                    &mut self.swc.recipient,
                    &mut from.swc.relay,
                );
                if accepted {
                    self.deliver(round, message);
                } else {
                    warn!(relay = from.id, recipient = self.id, ?round, "SendWithCheck rejected");
                    self.swc.rejected.push(from.id);
                }
            }
        }
        self.policy.cost()
    }
}

fn missing_setup(round: RoundId) -> WssError {
    WssError::MissingSetup {
        dealer: round.dealer,
        intermediary: round.intermediary,
        receiver: round.receiver,
    }
}
