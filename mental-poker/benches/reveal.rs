use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mental_poker::classic::classic_card_mappings;
use mental_poker::discrete_log_cards::{sample_masking_factor, DLCards};
use mental_poker::player::Player;
use mental_poker::reveal::open_card;
use mental_poker::BarnettSmartProtocol;

type Curve = ark_bn254::G1Projective;
type CardProtocol = DLCards<Curve>;

pub fn bench_card_lifecycle(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);

    let pp = CardProtocol::setup(4, 13).expect("setup failed");
    let card_mappings = classic_card_mappings(&pp).expect("mappings failed");

    let players: Vec<Player<Curve>> = (0..4)
        .map(|i| Player::new(&mut rng, &pp, format!("player {}", i).as_bytes()))
        .collect::<anyhow::Result<_>>()
        .expect("keygen failed");
    let key_proof_info: Vec<_> = players.iter().map(Player::public_info).collect();
    let shared_key =
        CardProtocol::compute_aggregate_key(&pp, &key_proof_info).expect("aggregation failed");

    c.bench_function("setup_52", |b| {
        b.iter(|| black_box(CardProtocol::setup(4, 13).expect("setup failed")))
    });

    let card = *pp.encoding.card(0).expect("empty encoding");
    c.bench_function("mask", |b| {
        b.iter(|| {
            let r = sample_masking_factor::<Curve, _>(&mut rng);
            black_box(CardProtocol::mask(&mut rng, &pp, &shared_key, &card, &r).expect("mask failed"))
        })
    });

    let r = sample_masking_factor::<Curve, _>(&mut rng);
    let (masked, _) = CardProtocol::mask(&mut rng, &pp, &shared_key, &card, &r).expect("mask failed");

    c.bench_function("compute_reveal_token", |b| {
        b.iter(|| {
            black_box(
                players[0]
                    .compute_reveal_token(&mut rng, &pp, &masked)
                    .expect("reveal failed"),
            )
        })
    });

    let tokens: Vec<_> = players
        .iter()
        .map(|player| player.compute_reveal_token(&mut rng, &pp, &masked))
        .collect::<anyhow::Result<_>>()
        .expect("reveal failed");

    c.bench_function("open_card_4_players", |b| {
        b.iter(|| {
            black_box(
                open_card(&pp, &shared_key, &tokens, &card_mappings, &masked).expect("open failed"),
            )
        })
    });
}

criterion_group!(benches, bench_card_lifecycle);
criterion_main!(benches);
