//! One hand of Texas hold'em between four players. The shuffle is played by
//! a single dealer who permutes and remasks the deck; everyone else checks
//! the remasking proofs.
//!
//! Run with `RUST_LOG=debug cargo run --example round` to follow the protocol.

use ark_std::rand::Rng;
use mental_poker::classic::{classic_card_mappings, CardMappings};
use mental_poker::discrete_log_cards::{self, sample_masking_factor, DLCards};
use mental_poker::player::Player;
use mental_poker::reveal::{collect_reveal_tokens, open_cards, RevealTokenCollection};
use mental_poker::BarnettSmartProtocol;
use rand::seq::SliceRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Curve = ark_bn254::G1Projective;
type CardProtocol = DLCards<Curve>;
type CardParameters = discrete_log_cards::Parameters<Curve>;
type AggregatePublicKey = discrete_log_cards::AggregatePublicKey<Curve>;
type MaskedCard = discrete_log_cards::MaskedCard<Curve>;

fn shuffle_and_remask<R: Rng>(
    rng: &mut R,
    pp: &CardParameters,
    shared_key: &AggregatePublicKey,
    deck: &[MaskedCard],
) -> anyhow::Result<Vec<MaskedCard>> {
    let mut permuted = deck.to_vec();
    permuted.shuffle(rng);

    permuted
        .iter()
        .map(|card| -> anyhow::Result<_> {
            let alpha = sample_masking_factor::<Curve, _>(rng);
            let (remasked, proof) = CardProtocol::remask(rng, pp, shared_key, card, &alpha)?;
            CardProtocol::verify_remask(pp, shared_key, card, &remasked, &proof)?;
            Ok(remasked)
        })
        .collect()
}

fn show(
    pp: &CardParameters,
    shared_key: &AggregatePublicKey,
    card_mappings: &CardMappings,
    collection: &RevealTokenCollection<Curve>,
    cards: &[MaskedCard],
) -> anyhow::Result<String> {
    let opened = open_cards(pp, shared_key, cards, card_mappings, collection)?;
    let shown: Vec<String> = cards.iter().map(|card| opened[card].to_string()).collect();
    Ok(shown.join(" "))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rng = &mut rand::thread_rng();

    let pp = CardProtocol::setup(4, 13)?;
    let card_mappings = classic_card_mappings(&pp)?;

    let mut players = ["andrija", "kobi", "nico", "tom"]
        .iter()
        .map(|name| Player::<Curve>::new(rng, &pp, name.as_bytes()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let key_proof_info: Vec<_> = players.iter().map(Player::public_info).collect();
    let shared_key = CardProtocol::compute_aggregate_key(&pp, &key_proof_info)?;
    info!(players = players.len(), "table is seated");

    let deck = CardProtocol::mask_initial_deck(&pp, &shared_key)?;
    let deck = shuffle_and_remask(rng, &pp, &shared_key, &deck)?;
    info!(cards = deck.len(), "deck shuffled");

    // two hole cards each, then five on the board
    let num_players = players.len();
    for (i, card) in deck.iter().take(2 * num_players).enumerate() {
        players[i % num_players].receive_card(*card);
    }
    let board = &deck[2 * num_players..2 * num_players + 5];
    let dealt = &deck[..2 * num_players + 5];

    let mut collection = RevealTokenCollection::default();
    for player in &players {
        let tokens = player.compute_others_reveal_tokens(rng, &pp, &deck[..2 * num_players])?;
        collect_reveal_tokens(dealt, tokens, &mut collection);
    }

    for player in players.iter_mut() {
        player.peek_my_cards(&pp, &shared_key, &card_mappings, &collection)?;
        let hand: Vec<String> = player
            .opened_cards()
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        info!(player = %String::from_utf8_lossy(player.name()), hand = %hand.join(" "), "peeked");
    }

    for player in &players {
        let tokens = player.compute_others_reveal_tokens(rng, &pp, board)?;
        collect_reveal_tokens(board, tokens, &mut collection);
    }

    for (street, cards) in [("flop", &board[..3]), ("turn", &board[..4]), ("river", board)] {
        let shown = show(&pp, &shared_key, &card_mappings, &collection, cards)?;
        info!(street, board = %shown, "dealt");
    }

    for player in &players {
        let tokens = player.compute_my_reveal_tokens(rng, &pp)?;
        collect_reveal_tokens(dealt, tokens, &mut collection);
    }
    for player in players.iter_mut() {
        let hand = show(&pp, &shared_key, &card_mappings, &collection, player.cards())?;
        info!(player = %String::from_utf8_lossy(player.name()), %hand, "showdown");
        player.discard_secret_key();
    }

    Ok(())
}
