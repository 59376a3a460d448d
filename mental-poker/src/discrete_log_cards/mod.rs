use crate::config::{
    DeckDimensions, KEY_OWNERSHIP_DOMAIN, MASKING_DOMAIN, REMASKING_DOMAIN, REVEAL_DOMAIN,
    SETUP_DOMAIN,
};
use crate::encoding::EncodingTable;
use crate::error::CardProtocolError;
use crate::BarnettSmartProtocol;

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::{One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;
use ark_std::rand::Rng;
use blake2::Blake2s256;
use proof_essentials::homomorphic_encryption::{el_gamal, el_gamal::ElGamal, HomomorphicEncryptionScheme};
use proof_essentials::utils::rand::{sample_nonzero, FiatShamirRng};
use proof_essentials::zkp::proofs::{chaum_pedersen_dl_equality, schnorr_identification};
use proof_essentials::zkp::ArgumentOfKnowledge;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};


type FS = FiatShamirRng<Blake2s256>;

pub struct DLCards<C: CurveGroup> {
    _group: PhantomData<C>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters<C: CurveGroup> {
    pub dimensions: DeckDimensions,
    pub enc_parameters: el_gamal::Parameters<C>,
    pub encoding: EncodingTable<C>,
}

impl<C: CurveGroup> Parameters<C> {
    pub fn generator(&self) -> &C::Affine {
        &self.enc_parameters.generator
    }

    pub fn m(&self) -> usize {
        self.dimensions.suits
    }

    pub fn n(&self) -> usize {
        self.dimensions.ranks
    }

    pub fn num_cards(&self) -> usize {
        self.encoding.len()
    }
}

pub type PublicKey<C> = el_gamal::PublicKey<C>;

/// A player's share of the joint decryption key. Wiped from memory on drop.
pub struct PlayerSecretKey<C: CurveGroup>(el_gamal::SecretKey<C>);

impl<C: CurveGroup> Zeroize for PlayerSecretKey<C> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<C: CurveGroup> Drop for PlayerSecretKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CurveGroup> ZeroizeOnDrop for PlayerSecretKey<C> {}

impl<C: CurveGroup> ark_std::fmt::Debug for PlayerSecretKey<C> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.write_str("PlayerSecretKey(..)")
    }
}

/// A published key together with the name it was registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyHolder<C: CurveGroup> {
    pub public_key: PublicKey<C>,
    pub name: Vec<u8>,
}

impl<C: CurveGroup> KeyHolder<C> {
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

/// Sum of every registered player key. Remembers who contributed so that a
/// reveal can insist on a token from each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatePublicKey<C: CurveGroup> {
    key: PublicKey<C>,
    holders: Vec<KeyHolder<C>>,
}

impl<C: CurveGroup> AggregatePublicKey<C> {
    pub fn key(&self) -> &PublicKey<C> {
        &self.key
    }

    pub fn holders(&self) -> &[KeyHolder<C>] {
        &self.holders
    }

    pub fn holder(&self, pk: &PublicKey<C>) -> Option<&KeyHolder<C>> {
        self.holders.iter().find(|holder| holder.public_key == *pk)
    }

    fn name_of(&self, pk: &PublicKey<C>) -> String {
        self.holder(pk)
            .map(KeyHolder::display_name)
            .unwrap_or_else(|| String::from("<unregistered>"))
    }
}

pub type Card<C> = el_gamal::Plaintext<C>;
pub type MaskedCard<C> = el_gamal::Ciphertext<C>;

/// `c1 · sk` for one player and one masked card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct RevealToken<C: CurveGroup>(pub C::Affine);

pub type ZKProofKeyOwnership<C> = schnorr_identification::proof::Proof<C>;
pub type ZKProofMasking<C> = chaum_pedersen_dl_equality::proof::Proof<C>;
pub type ZKProofRemasking<C> = chaum_pedersen_dl_equality::proof::Proof<C>;
pub type ZKProofReveal<C> = chaum_pedersen_dl_equality::proof::Proof<C>;

impl<C: CurveGroup> DLCards<C> {
    /// The publicly recomputable starting deck: every encoded card masked
    /// with randomness one, in encoding order.
    pub fn mask_initial_deck(
        pp: &Parameters<C>,
        shared_key: &AggregatePublicKey<C>,
    ) -> Result<Vec<MaskedCard<C>>, CardProtocolError> {
        let one = C::ScalarField::one();
        pp.encoding
            .cards()
            .iter()
            .map(|card| {
                ElGamal::<C>::encrypt(&pp.enc_parameters, &shared_key.key, card, &one)
                    .map_err(CardProtocolError::from)
            })
            .collect()
    }

    /// Unmask a card held by the caller: `others` must cover every key holder
    /// except `pk`, whose share is computed locally from `sk` and never leaves
    /// this function.
    #[instrument(skip_all, fields(tokens = others.len()))]
    pub fn unmask_with_own_share(
        pp: &Parameters<C>,
        shared_key: &AggregatePublicKey<C>,
        others: &[(RevealToken<C>, ZKProofReveal<C>, PublicKey<C>)],
        sk: &PlayerSecretKey<C>,
        pk: &PublicKey<C>,
        masked_card: &MaskedCard<C>,
    ) -> Result<Card<C>, CardProtocolError> {
        Self::check_masked_card(masked_card)?;
        Self::check_reveal_set(
            shared_key,
            others.iter().map(|(_, _, key)| key).chain(Some(pk)),
        )?;
        Self::verify_all(pp, shared_key, others, masked_card)?;

        let own_share = masked_card.0.mul_bigint(sk.0.into_bigint());
        let shares = others.iter().map(|(token, _, _)| token.0.into_group());

        Ok(Self::strip_shares(masked_card, shares.chain(Some(own_share))))
    }

    /// Card-level checks that come before any token is looked at, so a
    /// malformed card is never blamed on a token holder.
    fn check_masked_card(masked_card: &MaskedCard<C>) -> Result<(), CardProtocolError> {
        masked_card.check_components()?;
        if masked_card.is_degenerate() {
            let card = card_fingerprint(masked_card);
            warn!(%card, "masked card has an identity first component");
            return Err(CardProtocolError::DegenerateMaskedCard { card });
        }

        Ok(())
    }

    fn check_reveal_set<'a, I>(
        shared_key: &AggregatePublicKey<C>,
        contributors: I,
    ) -> Result<(), CardProtocolError>
    where
        I: Iterator<Item = &'a PublicKey<C>>,
    {
        let contributors: Vec<&PublicKey<C>> = contributors.collect();
        let supplied: HashSet<&PublicKey<C>> = contributors.iter().copied().collect();

        let missing: Vec<String> = shared_key
            .holders
            .iter()
            .filter(|holder| !supplied.contains(&holder.public_key))
            .map(KeyHolder::display_name)
            .collect();

        // holders are distinct, so equal counts plus full coverage is an exact match
        if !missing.is_empty() || contributors.len() != shared_key.holders.len() {
            warn!(
                expected = shared_key.holders.len(),
                received = contributors.len(),
                ?missing,
                "reveal set does not match the key holders"
            );
            return Err(CardProtocolError::IncompleteRevealSet {
                expected: shared_key.holders.len(),
                received: contributors.len(),
                missing,
            });
        }

        Ok(())
    }

    fn verify_all(
        pp: &Parameters<C>,
        shared_key: &AggregatePublicKey<C>,
        tokens: &[(RevealToken<C>, ZKProofReveal<C>, PublicKey<C>)],
        masked_card: &MaskedCard<C>,
    ) -> Result<(), CardProtocolError> {
        for (token, proof, pk) in tokens {
            if Self::verify_reveal_token(pp, pk, token, masked_card, proof).is_err() {
                let player = shared_key.name_of(pk);
                let card = card_fingerprint(masked_card);
                warn!(%player, %card, "reveal token failed verification");
                return Err(CardProtocolError::InvalidRevealToken { player, card });
            }
        }

        Ok(())
    }

    fn strip_shares<I: Iterator<Item = C>>(masked_card: &MaskedCard<C>, shares: I) -> Card<C> {
        let combined = shares.fold(C::zero(), |acc, share| acc + share);
        el_gamal::Plaintext((masked_card.1.into_group() - combined).into_affine())
    }
}

impl<C: CurveGroup> BarnettSmartProtocol for DLCards<C> {
    type Scalar = C::ScalarField;
    type Parameters = Parameters<C>;
    type PlayerPublicKey = PublicKey<C>;
    type PlayerSecretKey = PlayerSecretKey<C>;
    type AggregatePublicKey = AggregatePublicKey<C>;

    type Card = Card<C>;
    type MaskedCard = MaskedCard<C>;
    type RevealToken = RevealToken<C>;

    type ZKProofKeyOwnership = ZKProofKeyOwnership<C>;
    type ZKProofMasking = ZKProofMasking<C>;
    type ZKProofRemasking = ZKProofRemasking<C>;
    type ZKProofReveal = ZKProofReveal<C>;

    #[instrument]
    fn setup(m: usize, n: usize) -> Result<Self::Parameters, CardProtocolError> {
        let dimensions = DeckDimensions::new(m, n)?;

        let mut public_coin = FS::from_seed(SETUP_DOMAIN);
        public_coin.absorb(&(m as u64));
        public_coin.absorb(&(n as u64));

        let enc_parameters = ElGamal::<C>::setup(&mut public_coin)?;
        let encoding = EncodingTable::derive(
            &mut public_coin,
            dimensions.deck_size(),
            &enc_parameters.generator,
        );
        debug!(cards = encoding.len(), "derived card encoding");

        Ok(Parameters {
            dimensions,
            enc_parameters,
            encoding,
        })
    }

    fn player_keygen<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
    ) -> Result<(Self::PlayerPublicKey, Self::PlayerSecretKey), CardProtocolError> {
        let (pk, sk) = ElGamal::<C>::keygen(&pp.enc_parameters, rng)?;

        Ok((pk, PlayerSecretKey(sk)))
    }

    fn prove_key_ownership<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        sk: &Self::PlayerSecretKey,
        player_public_info: &[u8],
    ) -> Result<Self::ZKProofKeyOwnership, CardProtocolError> {
        let mut fs_rng = FS::from_seed(KEY_OWNERSHIP_DOMAIN);
        fs_rng.absorb(&player_public_info.to_vec());

        let proof = schnorr_identification::SchnorrIdentification::<C>::prove(
            rng,
            pp.generator(),
            pk,
            &sk.0,
            &mut fs_rng,
        )?;

        Ok(proof)
    }

    fn verify_key_ownership(
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        player_public_info: &[u8],
        key_proof: &Self::ZKProofKeyOwnership,
    ) -> Result<(), CardProtocolError> {
        let mut fs_rng = FS::from_seed(KEY_OWNERSHIP_DOMAIN);
        fs_rng.absorb(&player_public_info.to_vec());

        schnorr_identification::SchnorrIdentification::<C>::verify(
            pp.generator(),
            pk,
            key_proof,
            &mut fs_rng,
        )
        .map_err(|_| CardProtocolError::InvalidKeyOwnership {
            player: String::from_utf8_lossy(player_public_info).into_owned(),
        })
    }

    #[instrument(skip_all, fields(players = player_keys_proof_info.len()))]
    fn compute_aggregate_key<B: AsRef<[u8]>>(
        pp: &Self::Parameters,
        player_keys_proof_info: &[(Self::PlayerPublicKey, Self::ZKProofKeyOwnership, B)],
    ) -> Result<Self::AggregatePublicKey, CardProtocolError> {
        if player_keys_proof_info.is_empty() {
            return Err(CardProtocolError::EmptyPlayerSet);
        }

        let mut holders: Vec<KeyHolder<C>> = Vec::with_capacity(player_keys_proof_info.len());
        let mut acc = C::zero();

        for (pk, proof, info) in player_keys_proof_info {
            let name = info.as_ref();
            Self::verify_key_ownership(pp, pk, name, proof)?;

            let holder = KeyHolder {
                public_key: *pk,
                name: name.to_vec(),
            };
            if holders.iter().any(|known| known.public_key == *pk) {
                return Err(CardProtocolError::DuplicatePlayerKey {
                    player: holder.display_name(),
                });
            }

            acc += pk.into_group();
            holders.push(holder);
        }

        debug!(holders = holders.len(), "aggregated player keys");

        Ok(AggregatePublicKey {
            key: acc.into_affine(),
            holders,
        })
    }

    fn mask<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_card: &Self::Card,
        r: &Self::Scalar,
    ) -> Result<(Self::MaskedCard, Self::ZKProofMasking), CardProtocolError> {
        let masked_card = ElGamal::<C>::encrypt(&pp.enc_parameters, &shared_key.key, original_card, r)?;

        // (c1, c2 - m) = r·(g, pk)
        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &shared_key.key);
        let statement = chaum_pedersen_dl_equality::Statement::new(
            &masked_card.0,
            &(masked_card.1.into_group() - original_card.0.into_group()).into_affine(),
        );

        let proof = chaum_pedersen_dl_equality::DLEquality::<C>::prove(
            rng,
            &parameters,
            &statement,
            r,
            &mut FS::from_seed(MASKING_DOMAIN),
        )?;

        Ok((masked_card, proof))
    }

    fn verify_mask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        card: &Self::Card,
        masked_card: &Self::MaskedCard,
        proof: &Self::ZKProofMasking,
    ) -> Result<(), CardProtocolError> {
        if masked_card.check_components().is_err() || masked_card.is_degenerate() {
            return Err(CardProtocolError::InvalidProof("masking"));
        }

        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &shared_key.key);
        let statement = chaum_pedersen_dl_equality::Statement::new(
            &masked_card.0,
            &(masked_card.1.into_group() - card.0.into_group()).into_affine(),
        );

        chaum_pedersen_dl_equality::DLEquality::<C>::verify(
            &parameters,
            &statement,
            proof,
            &mut FS::from_seed(MASKING_DOMAIN),
        )
        .map_err(|_| CardProtocolError::InvalidProof("masking"))
    }

    fn remask<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_masked: &Self::MaskedCard,
        alpha: &Self::Scalar,
    ) -> Result<(Self::MaskedCard, Self::ZKProofRemasking), CardProtocolError> {
        let masking_of_zero = ElGamal::<C>::encrypt(
            &pp.enc_parameters,
            &shared_key.key,
            &el_gamal::Plaintext::zero(),
            alpha,
        )?;
        let remasked = *original_masked + masking_of_zero;

        // (c1' - c1, c2' - c2) = alpha·(g, pk)
        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &shared_key.key);
        let statement =
            chaum_pedersen_dl_equality::Statement::new(&masking_of_zero.0, &masking_of_zero.1);

        let proof = chaum_pedersen_dl_equality::DLEquality::<C>::prove(
            rng,
            &parameters,
            &statement,
            alpha,
            &mut FS::from_seed(REMASKING_DOMAIN),
        )?;

        Ok((remasked, proof))
    }

    fn verify_remask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_masked: &Self::MaskedCard,
        remasked: &Self::MaskedCard,
        proof: &Self::ZKProofRemasking,
    ) -> Result<(), CardProtocolError> {
        if remasked.check_components().is_err() || remasked == original_masked {
            return Err(CardProtocolError::InvalidProof("remasking"));
        }

        let difference = *remasked - *original_masked;
        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &shared_key.key);
        let statement = chaum_pedersen_dl_equality::Statement::new(&difference.0, &difference.1);

        chaum_pedersen_dl_equality::DLEquality::<C>::verify(
            &parameters,
            &statement,
            proof,
            &mut FS::from_seed(REMASKING_DOMAIN),
        )
        .map_err(|_| CardProtocolError::InvalidProof("remasking"))
    }

    fn compute_reveal_token<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        sk: &Self::PlayerSecretKey,
        pk: &Self::PlayerPublicKey,
        masked_card: &Self::MaskedCard,
    ) -> Result<(Self::RevealToken, Self::ZKProofReveal), CardProtocolError> {
        Self::check_masked_card(masked_card)?;
        let reveal_token = RevealToken(masked_card.0.mul_bigint(sk.0.into_bigint()).into_affine());

        // log_g(pk) == log_c1(token)
        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &masked_card.0);
        let statement = chaum_pedersen_dl_equality::Statement::new(pk, &reveal_token.0);

        let proof = chaum_pedersen_dl_equality::DLEquality::<C>::prove(
            rng,
            &parameters,
            &statement,
            &sk.0,
            &mut FS::from_seed(REVEAL_DOMAIN),
        )?;

        Ok((reveal_token, proof))
    }

    fn verify_reveal_token(
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        reveal_token: &Self::RevealToken,
        masked_card: &Self::MaskedCard,
        proof: &Self::ZKProofReveal,
    ) -> Result<(), CardProtocolError> {
        if masked_card.check_components().is_err() || masked_card.is_degenerate() {
            return Err(CardProtocolError::InvalidProof("reveal"));
        }

        let parameters = chaum_pedersen_dl_equality::Parameters::new(pp.generator(), &masked_card.0);
        let statement = chaum_pedersen_dl_equality::Statement::new(pk, &reveal_token.0);

        chaum_pedersen_dl_equality::DLEquality::<C>::verify(
            &parameters,
            &statement,
            proof,
            &mut FS::from_seed(REVEAL_DOMAIN),
        )
        .map_err(|_| CardProtocolError::InvalidProof("reveal"))
    }

    #[instrument(skip_all, fields(tokens = decryption_key.len()))]
    fn unmask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        decryption_key: &[(Self::RevealToken, Self::ZKProofReveal, Self::PlayerPublicKey)],
        masked_card: &Self::MaskedCard,
    ) -> Result<Self::Card, CardProtocolError> {
        Self::check_masked_card(masked_card)?;
        Self::check_reveal_set(shared_key, decryption_key.iter().map(|(_, _, pk)| pk))?;
        Self::verify_all(pp, shared_key, decryption_key, masked_card)?;

        let shares = decryption_key.iter().map(|(token, _, _)| token.0.into_group());

        Ok(Self::strip_shares(masked_card, shares))
    }
}

/// Short hex tag of a masked card for error reports and logs: the first
/// eight bytes of its compressed encoding.
pub fn card_fingerprint<C: CurveGroup>(masked_card: &MaskedCard<C>) -> String {
    let mut bytes = Vec::with_capacity(masked_card.compressed_size());
    if masked_card.serialize_compressed(&mut bytes).is_err() {
        return String::from("<unencodable>");
    }
    bytes.iter().take(8).map(|byte| format!("{:02x}", byte)).collect()
}

/// Scalar type of the group, re-exported for callers choosing masking factors.
pub type Scalar<C> = <C as Group>::ScalarField;

/// Draw a fresh nonzero masking factor.
pub fn sample_masking_factor<C: CurveGroup, R: Rng>(rng: &mut R) -> Scalar<C> {
    sample_nonzero(rng)
}
