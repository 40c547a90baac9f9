// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Public verification of distribution shares boxes and share boxes.

use num_bigint::BigInt;
use num_traits::Signed;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::distribution::commitment_for_position;
use crate::dleq::DLEQ;
use crate::group::GroupParameters;
use crate::sharebox::{DistributionSharesBox, ShareBox};
use crate::util::{challenge_from_hasher, hash_update};

impl GroupParameters {
    /// Verifies that the shares the distribution shares box consists are consistent.
    ///
    /// For every public key `y_i` the verifier recomputes `X_i` from the
    /// commitments and checks `DLEQ(g, X_i, y_i, Y_i)` against the common
    /// challenge. A box with a missing entry for any listed key is rejected.
    pub fn verify_distribution_shares(
        &self,
        distribute_sharesbox: &DistributionSharesBox,
    ) -> bool {
        let challenge = &distribute_sharesbox.challenge;
        if challenge.is_negative() {
            return false;
        }

        let transcripts: Vec<Option<[BigInt; 4]>> = distribute_sharesbox
            .publickeys
            .par_iter()
            .map(|publickey| {
                self.recompute_transcript(
                    distribute_sharesbox,
                    publickey,
                    challenge,
                )
            })
            .collect();

        let transcripts: Option<Vec<[BigInt; 4]>> =
            transcripts.into_iter().collect();
        let transcripts = match transcripts {
            Some(transcripts) => transcripts,
            None => {
                warn!("distribution shares box is missing entries");
                return false;
            }
        };

        let mut challenge_hasher = Sha256::new();
        for transcript in &transcripts {
            for value in transcript {
                hash_update(&mut challenge_hasher, value);
            }
        }
        challenge_from_hasher(challenge_hasher, &self.order()) == *challenge
    }

    /// `[X_i, Y_i, a_1i, a_2i]` for one participant, `None` if the box lacks
    /// its position, encrypted share or response.
    fn recompute_transcript(
        &self,
        distribute_sharesbox: &DistributionSharesBox,
        publickey: &BigInt,
        challenge: &BigInt,
    ) -> Option<[BigInt; 4]> {
        let position = *distribute_sharesbox.positions.get(publickey)?;
        let encrypted_share = distribute_sharesbox.shares.get(publickey)?;
        let response = distribute_sharesbox.responses.get(publickey)?;
        if position < 1 || response.is_negative() {
            return None;
        }

        let x = commitment_for_position(
            self,
            &distribute_sharesbox.commitments,
            &BigInt::from(position),
        );
        let (a1, a2) = DLEQ::recompute_commitments(
            self,
            &self.g,
            &x,
            publickey,
            encrypted_share,
            response,
            challenge,
        );
        Some([x, encrypted_share.clone(), a1, a2])
    }

    /// Verifies if the share in the share box was decrypted correctly by the
    /// participant owning `publickey`.
    pub fn verify_share(
        &self,
        sharebox: &ShareBox,
        distribution_sharebox: &DistributionSharesBox,
        publickey: &BigInt,
    ) -> bool {
        if sharebox.publickey != *publickey {
            return false;
        }
        match distribution_sharebox.shares.get(publickey) {
            Some(encrypted_share) => {
                self.verify_share_with_encrypted(sharebox, encrypted_share)
            }
            None => false,
        }
    }

    /// Checks `DLEQ(G, y_i, S_i, Y_i)` for a share box against the encrypted
    /// share `Y_i` it claims to decrypt.
    pub fn verify_share_with_encrypted(
        &self,
        sharebox: &ShareBox,
        encrypted_share: &BigInt,
    ) -> bool {
        if sharebox.challenge.is_negative() || sharebox.response.is_negative() {
            return false;
        }
        let (a1, a2) = DLEQ::recompute_commitments(
            self,
            &self.G,
            &sharebox.publickey,
            &sharebox.share,
            encrypted_share,
            &sharebox.response,
            &sharebox.challenge,
        );

        let mut challenge_hasher = Sha256::new();
        hash_update(&mut challenge_hasher, &sharebox.publickey);
        hash_update(&mut challenge_hasher, encrypted_share);
        hash_update(&mut challenge_hasher, &a1);
        hash_update(&mut challenge_hasher, &a2);
        challenge_from_hasher(challenge_hasher, &self.order())
            == sharebox.challenge
    }
}
