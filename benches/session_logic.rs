use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco_quest::core::{ItemPool, PollutionCleanup, WasteSorter};
use eco_quest::engine::{App, SessionDriver};
use eco_quest::profile::{Leaderboard, MemoryStore, ProfileService, Scope};
use eco_quest::term::{AppView, FrameBuffer, Viewport};
use eco_quest::types::{Command, GameKind};

fn bench_sorter_round(c: &mut Criterion) {
    c.bench_function("sorter_full_round", |b| {
        b.iter(|| {
            let mut game = WasteSorter::new(black_box(12345));
            game.start();
            while let Some(item) = game.current() {
                game.sort(item.bin);
                game.present_next();
            }
            game.session().score()
        })
    });
}

fn bench_pool_draw(c: &mut Criterion) {
    let mut pool = ItemPool::new((0..32).collect::<Vec<u32>>(), 7);

    c.bench_function("item_pool_draw", |b| {
        b.iter(|| black_box(pool.draw()))
    });
}

fn bench_cleanup_spawn_and_clean(c: &mut Criterion) {
    let mut game = PollutionCleanup::new(99);
    game.start();

    c.bench_function("cleanup_spawn_clean", |b| {
        b.iter(|| {
            if !game.session().is_active() {
                game.start();
            }
            if let Some(p) = game.spawn() {
                game.clean(p.id);
            }
        })
    });
}

fn bench_driver_frame(c: &mut Criterion) {
    let mut driver = SessionDriver::for_kind(GameKind::PollutionCleanup, 3);
    driver.start();

    c.bench_function("driver_update_16ms", |b| {
        b.iter(|| {
            if !driver.game().session().is_active() {
                driver.start();
            }
            driver.update(black_box(16))
        })
    });
}

fn bench_leaderboard_rank(c: &mut Criterion) {
    let board = Leaderboard::default();

    c.bench_function("leaderboard_rank_school", |b| {
        b.iter(|| board.rank(Scope::School, black_box("Kennedy"), black_box("a")))
    });
}

fn bench_render_hub(c: &mut Criterion) {
    let mut service = ProfileService::load(MemoryStore::new());
    let _ = service.login("bench@school.org");
    let mut app = App::new(service, 1);
    app.handle(Command::Leaderboard);
    let view = AppView::new();
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("render_leaderboard_120x40", |b| {
        b.iter(|| view.render_into(&app, Viewport::new(120, 40), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_sorter_round,
    bench_pool_draw,
    bench_cleanup_spawn_and_clean,
    bench_driver_frame,
    bench_leaderboard_rank,
    bench_render_hub
);
criterion_main!(benches);
