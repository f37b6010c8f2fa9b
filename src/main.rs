//! Rage Tiles entry point
//!
//! The web front end drives the library through wasm-bindgen glue; the
//! native binary runs a short headless demo round so the core can be
//! exercised (and profiled) without a browser.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use rage_tiles::consts::{DEFAULT_TILE_H, DEFAULT_TILE_W};
    use rage_tiles::rng::{BlendedRng, daily_seed_str};
    use rage_tiles::sim::{self, Arena, GameEvent, RoundState};
    use rage_tiles::ui;

    env_logger::init();

    let seed_str = daily_seed_str();
    log::info!("Rage Tiles (native demo), daily challenge {seed_str}");

    let arena = Arena::new(520.0, 640.0, DEFAULT_TILE_W, DEFAULT_TILE_H);
    let mut state = RoundState::new(arena, BlendedRng::for_day(&seed_str), 0);

    sim::start(&mut state, 0.0);

    // Headless auto-player: hover near the middle, tap a safe tile roughly
    // every 400ms, and let the evasion logic do its worst
    let mut now = 0.0;
    let mut next_tap = 400.0;
    while state.is_playing() && now < 20_000.0 {
        now += 16.0;
        sim::pointer_moved(&mut state, Vec2::new(260.0, 320.0), now);
        sim::advance(&mut state, now);

        if state.is_playing() && now >= next_tap {
            let views = ui::tile_views(&state, now);
            // The demo player always reads the danger flag correctly; a
            // human would not
            if let Some(safe) = views.iter().enumerate().find(|(_, v)| !v.danger) {
                sim::tap(&mut state, safe.0, safe.1.pos, now);
            }
            next_tap = now + 400.0;
        }

        // The demo player is too good to ever lose on its own: end the run
        // by walking into the red tile once time is up
        if state.is_playing() && now >= 20_000.0 {
            let danger = state.danger_index;
            let pos = state.tiles[danger].pos;
            sim::tap(&mut state, danger, pos, now);
        }

        for event in state.take_events() {
            match event {
                GameEvent::ScoreChanged { score } => {
                    if let Some(taunt) = ui::taunt_for(score) {
                        log::info!("score {score}: {taunt}");
                    }
                }
                GameEvent::PhaseChanged { phase } => log::info!("entered phase {phase}"),
                GameEvent::RoundEnded { reason, score, best } => {
                    let copy = ui::end_copy(score);
                    println!("{} - {}", copy.title, ui::reason_line(reason));
                    println!("{} {}", copy.message, ui::loss_extra(score));
                    println!("score {score}, best {best}");
                    println!("{}", ui::share_text(score, &seed_str));
                }
                _ => {}
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the front-end glue; this satisfies the compiler
}
