use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetra_core::core::{Board, Game, Piece, PieceGen};
use tetra_core::types::{Input, InputSet, Shape};

fn bench_advance_frame(c: &mut Criterion) {
    let mut game = Game::new(0, 999, 12345).unwrap();
    let held = InputSet::empty().with(Input::Down);

    c.bench_function("advance_frame_soft_drop", |b| {
        b.iter(|| {
            game.advance_frame(black_box(held));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 0..4 {
                for col in 0..10 {
                    board.set(col, row, Some(Shape::I));
                }
            }
            for row in (0..4).rev() {
                board.clear_row(black_box(row));
            }
        })
    });
}

fn bench_legality_check(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::at(Shape::T, 0, 3, 10);

    c.bench_function("is_legal", |b| {
        b.iter(|| board.is_legal(black_box(&piece)))
    });
}

fn bench_piece_generation(c: &mut Criterion) {
    let mut generator = PieceGen::new(12345);
    generator.first_draw();

    c.bench_function("generator_draw", |b| {
        b.iter(|| black_box(generator.draw()))
    });
}

criterion_group!(
    benches,
    bench_advance_frame,
    bench_line_clear,
    bench_legality_check,
    bench_piece_generation
);
criterion_main!(benches);
