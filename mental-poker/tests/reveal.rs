use ark_std::{test_rng, One, UniformRand, Zero};
use mental_poker::classic::{classic_card_mappings, ClassicPlayingCard, Suite, Value};
use mental_poker::discrete_log_cards::{self, sample_masking_factor, DLCards};
use mental_poker::player::Player;
use mental_poker::reveal::{collect_reveal_tokens, open_card, open_cards, RevealTokenCollection};
use mental_poker::{BarnettSmartProtocol, CardProtocolError};

type Curve = ark_bn254::G1Projective;
type Scalar = ark_bn254::Fr;
type CardProtocol = DLCards<Curve>;
type MaskedCard = discrete_log_cards::MaskedCard<Curve>;

fn table(
    rng: &mut impl ark_std::rand::Rng,
    pp: &discrete_log_cards::Parameters<Curve>,
    names: &[&str],
) -> (Vec<Player<Curve>>, discrete_log_cards::AggregatePublicKey<Curve>) {
    let players: Vec<Player<Curve>> = names
        .iter()
        .map(|name| Player::new(rng, pp, name.as_bytes()).unwrap())
        .collect();
    let key_proof_info: Vec<_> = players.iter().map(Player::public_info).collect();
    let shared_key = CardProtocol::compute_aggregate_key(pp, &key_proof_info).unwrap();
    (players, shared_key)
}

/// The dealer role: mask a known card, then remask it as a shuffle would.
fn deal(
    rng: &mut impl ark_std::rand::Rng,
    pp: &discrete_log_cards::Parameters<Curve>,
    shared_key: &discrete_log_cards::AggregatePublicKey<Curve>,
    index: usize,
) -> MaskedCard {
    let card = pp.encoding.card(index).unwrap();
    let r = sample_masking_factor::<Curve, _>(rng);
    let (masked, proof) = CardProtocol::mask(rng, pp, shared_key, card, &r).unwrap();
    CardProtocol::verify_mask(pp, shared_key, card, &masked, &proof).unwrap();

    let alpha = sample_masking_factor::<Curve, _>(rng);
    let (remasked, proof) = CardProtocol::remask(rng, pp, shared_key, &masked, &alpha).unwrap();
    CardProtocol::verify_remask(pp, shared_key, &masked, &remasked, &proof).unwrap();
    remasked
}

#[test]
fn two_players_reveal_the_ace_of_spades() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    assert_eq!(pp.encoding.len(), 52);
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["andrija", "kobi"]);

    let card = pp.encoding.card(0).unwrap();
    let r = Scalar::rand(rng);
    let (masked, proof) = CardProtocol::mask(rng, &pp, &shared_key, card, &r).unwrap();
    CardProtocol::verify_mask(&pp, &shared_key, card, &masked, &proof).unwrap();

    let tokens: Vec<_> = players
        .iter()
        .map(|player| player.compute_reveal_token(rng, &pp, &masked).unwrap())
        .collect();
    for (token, proof, pk) in &tokens {
        CardProtocol::verify_reveal_token(&pp, pk, token, &masked, proof).unwrap();
    }

    assert_eq!(
        open_card(&pp, &shared_key, &tokens, &mappings, &masked).unwrap(),
        ClassicPlayingCard::new(Value::Ace, Suite::Spade)
    );
}

#[test]
fn token_for_another_card_names_the_player() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["andrija", "kobi"]);

    let masked = deal(rng, &pp, &shared_key, 0);
    let decoy = deal(rng, &pp, &shared_key, 0);

    let tokens = vec![
        players[0].compute_reveal_token(rng, &pp, &masked).unwrap(),
        players[1].compute_reveal_token(rng, &pp, &decoy).unwrap(),
    ];

    assert_eq!(
        open_card(&pp, &shared_key, &tokens, &mappings, &masked),
        Err(CardProtocolError::InvalidRevealToken {
            player: String::from("kobi"),
            card: discrete_log_cards::card_fingerprint(&masked),
        })
    );
}

#[test]
fn honest_players_are_not_blamed_for_a_zero_mask() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["alice", "bob"]);

    let card = pp.encoding.card(0).unwrap();
    let (degenerate, _) =
        CardProtocol::mask(rng, &pp, &shared_key, card, &Scalar::zero()).unwrap();

    let err = players[0]
        .compute_reveal_token(rng, &pp, &degenerate)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CardProtocolError>(),
        Some(CardProtocolError::DegenerateMaskedCard { .. })
    ));

    let healthy = deal(rng, &pp, &shared_key, 0);
    let tokens: Vec<_> = players
        .iter()
        .map(|player| player.compute_reveal_token(rng, &pp, &healthy).unwrap())
        .collect();
    assert_eq!(
        open_card(&pp, &shared_key, &tokens, &mappings, &degenerate),
        Err(CardProtocolError::DegenerateMaskedCard {
            card: discrete_log_cards::card_fingerprint(&degenerate),
        })
    );
}

#[test]
fn missing_token_is_never_good_enough() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["andrija", "kobi", "nico"]);

    let masked = deal(rng, &pp, &shared_key, 17);
    let tokens: Vec<_> = players[..2]
        .iter()
        .map(|player| player.compute_reveal_token(rng, &pp, &masked).unwrap())
        .collect();

    assert_eq!(
        open_card(&pp, &shared_key, &tokens, &mappings, &masked),
        Err(CardProtocolError::IncompleteRevealSet {
            expected: 3,
            received: 2,
            missing: vec![String::from("nico")],
        })
    );
}

#[test]
fn every_card_survives_dealing() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["andrija", "kobi", "nico"]);

    for index in (0..52).step_by(7) {
        let masked = deal(rng, &pp, &shared_key, index);
        let tokens: Vec<_> = players
            .iter()
            .map(|player| player.compute_reveal_token(rng, &pp, &masked).unwrap())
            .collect();

        assert_eq!(
            open_card(&pp, &shared_key, &tokens, &mappings, &masked).unwrap(),
            mappings[&index]
        );
    }
}

#[test]
fn forged_ciphertext_is_not_a_card() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (players, shared_key) = table(rng, &pp, &["andrija", "kobi"]);

    let not_a_card = discrete_log_cards::Card::<Curve>::rand(rng);
    let (masked, _) =
        CardProtocol::mask(rng, &pp, &shared_key, &not_a_card, &Scalar::one()).unwrap();
    let tokens: Vec<_> = players
        .iter()
        .map(|player| player.compute_reveal_token(rng, &pp, &masked).unwrap())
        .collect();

    assert_eq!(
        open_card(&pp, &shared_key, &tokens, &mappings, &masked),
        Err(CardProtocolError::UnknownCardElement)
    );
}

#[test]
fn players_peek_privately_then_show_down() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (mut players, shared_key) = table(rng, &pp, &["andrija", "kobi", "nico"]);

    let deck: Vec<MaskedCard> = (0..6).map(|i| deal(rng, &pp, &shared_key, i * 5)).collect();
    for (i, card) in deck.iter().enumerate() {
        players[i % 3].receive_card(*card);
    }

    // everyone helps everyone else peek
    let mut peek_collection = RevealTokenCollection::default();
    for player in &players {
        let tokens = player.compute_others_reveal_tokens(rng, &pp, &deck).unwrap();
        collect_reveal_tokens(&deck, tokens, &mut peek_collection);
    }
    for player in players.iter_mut() {
        player
            .peek_my_cards(&pp, &shared_key, &mappings, &peek_collection)
            .unwrap();
    }
    assert_eq!(players[0].opened_cards(), &[Some(mappings[&0]), Some(mappings[&15])]);
    assert_eq!(players[2].opened_cards(), &[Some(mappings[&10]), Some(mappings[&25])]);

    // before showdown nobody can open a card on the peek tokens alone
    assert!(open_cards(&pp, &shared_key, &deck, &mappings, &peek_collection).is_err());

    let mut showdown = peek_collection;
    for player in &players {
        let tokens = player.compute_my_reveal_tokens(rng, &pp).unwrap();
        collect_reveal_tokens(&deck, tokens, &mut showdown);
    }
    let opened = open_cards(&pp, &shared_key, &deck, &mappings, &showdown).unwrap();
    for (i, card) in deck.iter().enumerate() {
        assert_eq!(opened[card], mappings[&(i * 5)]);
    }
}

#[test]
fn batch_open_reports_the_failing_card() {
    let rng = &mut test_rng();
    let pp = CardProtocol::setup(4, 13).unwrap();
    let mappings = classic_card_mappings(&pp).unwrap();
    let (_, shared_key) = table(rng, &pp, &["andrija", "kobi"]);

    let deck = vec![deal(rng, &pp, &shared_key, 3)];
    let err = open_cards(&pp, &shared_key, &deck, &mappings, &RevealTokenCollection::default())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CardProtocolError>(),
        Some(CardProtocolError::IncompleteRevealSet { received: 0, .. })
    ));
}
