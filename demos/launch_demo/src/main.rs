//! Launch Demo
//!
//! Loads the RON bindings under `assets/` and plays a short level through
//! them: a launch, a fast climb, a crash, a respawn and a second flight.
//! Set `RUST_LOG=debug` to watch individual bindings fire.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

use thrust_core::{
    AssetId, CharacterStats, DVec2, DVec3, Dispatcher, Effect, EffectHandler, EffectInvocation,
    LaunchInfo, LevelState, LevelStateTracker, RespawnEvent, RespawnEventInfo, ScoreKeeper,
    ScreenShaker, Value,
};
use thrust_script::{Assets, Loader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FRAME: f64 = 1.0 / 60.0;

/// Everything the bindings can touch
#[derive(Default)]
struct Game {
    score: ScoreKeeper,
    shaker: ScreenShaker,
    level: LevelStateTracker,
    labels: BTreeMap<AssetId, String>,
    components: BTreeMap<AssetId, bool>,
    animation: Option<String>,
}

impl Game {
    fn new() -> Self {
        let mut game = Self::default();
        game.components.insert("hud".into(), true);
        game.components.insert("end_screen".into(), false);
        game.components.insert("trail".into(), false);
        game
    }
}

impl EffectHandler for Game {
    fn handle(&mut self, invocation: &EffectInvocation) {
        match &invocation.effect {
            Effect::AddScore => self.score.handle(invocation),
            Effect::ScreenShake => self.shaker.handle(invocation),
            Effect::BroadcastLevelState => self.level.handle(invocation),
            Effect::PlayAnimation(state) => {
                info!(state = state.name(), hash = state.hash(), "animation");
                self.animation = Some(state.name().to_string());
            }
            Effect::SetText { target } => match invocation.value.as_str() {
                Some(text) => {
                    self.labels.insert(target.clone(), text.to_string());
                }
                None => warn!(%target, value = %invocation.value, "label expects text"),
            },
            Effect::SetComponentsEnabled {
                components,
                enabled,
            } => {
                for component in components {
                    self.components.insert(component.clone(), *enabled);
                }
            }
            Effect::ToggleComponents { components } => {
                for component in components {
                    let enabled = self.components.entry(component.clone()).or_default();
                    *enabled = !*enabled;
                }
            }
        }
    }
}

fn set_state(dispatcher: &mut Dispatcher, state: LevelState) {
    dispatcher.send("level_state", Some(state.into()));
}

fn respawn(dispatcher: &mut Dispatcher, event: RespawnEvent, attempt: u32) {
    let info = RespawnEventInfo {
        event,
        position: DVec3::new(0.0, 12.0, 0.0),
        attempt,
    };
    dispatcher.send("respawn", Some(info.into()));
}

fn fly(dispatcher: &Dispatcher, game: &mut Game, velocities: &[DVec2]) {
    for velocity in velocities {
        dispatcher.dispatch_to(&"velocity".into(), Some(Value::Vec2(*velocity)), &mut *game);
        game.shaker.advance(FRAME * 10.0);
    }
}

fn load(dir: &Path) -> thrust_script::Result<Assets> {
    let mut loader = Loader::new();
    loader.load_directory(dir)?;
    loader.finish()
}

/// The launch record goes to `launched`, the burn duration alone to `burn`
fn launch(dispatcher: &Dispatcher, game: &mut Game, info: LaunchInfo) -> Vec<AssetId> {
    dispatcher.dispatch_to(&"launched".into(), Some(info.into()), &mut *game);
    let burn = dispatcher.dispatch_to(&"burn".into(), Some(info.burn_duration.into()), game);
    burn.rejected
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let assets_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let assets = load(&assets_dir)?;
    let mut dispatcher = assets.dispatcher;
    let mut game = Game::new();

    info!(
        bindings = dispatcher.len(),
        assets = assets.registry.len(),
        "loaded {}",
        assets_dir.display()
    );

    let stats = CharacterStats {
        thrust: 42.5,
        mass: 1.2,
        fuel_capacity: 100.0,
        drag: 0.05,
        turn_rate: 180.0,
        max_speed: 30.0,
    };
    dispatcher.send("stats", Some(stats.into()));
    set_state(&mut dispatcher, LevelState::Loading);
    set_state(&mut dispatcher, LevelState::PreLaunch);
    set_state(&mut dispatcher, LevelState::Flying);
    dispatcher.flush(&mut game);

    // First attempt: strong launch, fast climb, crash
    let first = LaunchInfo {
        burn_duration: 1.8,
        power: 4.0,
        direction: DVec2::new(0.2, 1.0).normalize(),
    };
    launch(&dispatcher, &mut game, first);
    info!(
        amplitude = game.shaker.amplitude(),
        frequency = ?game.shaker.frequency(),
        "launch shake"
    );

    fly(
        &dispatcher,
        &mut game,
        &[
            DVec2::new(2.0, 8.0),
            DVec2::new(4.0, 14.0),
            DVec2::new(6.0, 11.0),
            DVec2::new(9.0, -13.0),
        ],
    );

    respawn(&mut dispatcher, RespawnEvent::Died, 1);
    set_state(&mut dispatcher, LevelState::Failed);
    let crash = dispatcher.flush(&mut game);
    info!(
        fired = crash.invocations.len(),
        rejected = crash.rejected.len(),
        shaking = game.shaker.is_shaking(),
        "crashed"
    );

    // Second attempt: weak launch, no shake
    respawn(&mut dispatcher, RespawnEvent::Respawned, 2);
    set_state(&mut dispatcher, LevelState::Flying);
    dispatcher.flush(&mut game);

    let second = LaunchInfo {
        burn_duration: 0.9,
        power: 1.5,
        direction: DVec2::Y,
    };
    let rejected = launch(&dispatcher, &mut game, second);
    info!(?rejected, shaking = game.shaker.is_shaking(), "second launch");

    fly(&dispatcher, &mut game, &[DVec2::new(0.0, 13.0), DVec2::new(0.0, 16.0)]);
    set_state(&mut dispatcher, LevelState::Succeeded);
    dispatcher.flush(&mut game);

    println!("\n=== Final State ===");
    println!("Score: {} (best {})", game.score.score(), game.score.best());
    if let Some(state) = game.level.current() {
        println!("Level: {state}");
    }
    for transition in game.level.history() {
        match transition.from {
            Some(from) => println!("  {from} -> {}", transition.to),
            None => println!("  -> {}", transition.to),
        }
    }
    println!("Animation: {}", game.animation.as_deref().unwrap_or("none"));
    println!("Labels:");
    for (target, text) in &game.labels {
        println!("  {target}: {text}");
    }
    println!("Components:");
    for (component, enabled) in &game.components {
        println!("  {component}: {}", if *enabled { "on" } else { "off" });
    }

    Ok(())
}
