use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sanchess::{legal, movegen, moves, moves::san, Color, Coord, Engine};

const POSITIONS: [(&str, &str); 9] = [
    ("initial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w",
    ),
    ("open_position", "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w"),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3 w"),
    ("pawn_promote", "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w"),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2 w",
    ),
];

fn engines() -> impl Iterator<Item = (&'static str, Engine)> {
    POSITIONS
        .iter()
        .map(|&(name, fen)| (name, Engine::from_fen(fen).unwrap()))
}

fn bench_gen_semilegal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_semilegal");
    for (name, engine) in engines() {
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(movegen::gen_semilegal(engine.board(), engine.side(), None).len())
            })
        });
    }
}

fn bench_gen_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_legal");
    for (name, engine) in engines() {
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(
                    legal::gen_legal(engine.board(), engine.side(), None)
                        .unwrap()
                        .len(),
                )
            })
        });
    }
}

fn bench_make_unmake(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_unmake");
    for (name, engine) in engines() {
        let mut board = *engine.board();
        let moves = engine.legal_moves();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let mv = mv.resolved();
                    moves::make_move(&mut board, &mv).unwrap();
                    moves::unmake_move(&mut board, &mv).unwrap();
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, engine) in engines() {
        let board = engine.board();
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(movegen::is_cell_attacked(board, coord, color));
                    }
                }
            })
        });
    }
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, engine) in engines() {
        group.bench_function(name, |b| b.iter(|| black_box(engine.has_legal_moves())));
    }
}

fn bench_san_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("san_encode");
    for (name, engine) in engines() {
        let moves = engine.legal_moves();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(san::encode(&engine, mv));
                }
            })
        });
    }
}

criterion_group!(
    chess,
    bench_gen_semilegal,
    bench_gen_legal,
    bench_make_unmake,
    bench_is_attacked,
    bench_has_legal_moves,
    bench_san_encode,
);

criterion_main!(chess);
