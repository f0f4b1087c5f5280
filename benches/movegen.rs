use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shatranj::{outcome, Board, Color, Square};

fn open_middlegame() -> Board {
    Board::new()
        .apply_move(Square::E2, Square::E4)
        .apply_move(Square::E7, Square::E5)
        .apply_move(Square::G1, Square::F3)
        .apply_move(Square::B8, Square::C6)
        .apply_move(Square::F1, Square::C4)
        .apply_move(Square::F8, Square::C5)
}

fn bench_movegen(c: &mut Criterion) {
    let start = Board::new();
    c.bench_function("all_legal_moves_startpos", |b| {
        b.iter(|| {
            let board = black_box(&start);
            board
                .pieces_of(Color::White)
                .map(|piece| piece.all_legal_moves(board).len())
                .sum::<usize>()
        })
    });

    let open = open_middlegame();
    c.bench_function("can_move_middlegame", |b| {
        b.iter(|| black_box(&open).can_move(Color::White))
    });

    c.bench_function("outcome_middlegame", |b| {
        b.iter(|| outcome(black_box(&open), Color::Black))
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
