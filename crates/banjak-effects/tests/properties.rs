//! Behavioral invariants that hold for every effect, exercised through the
//! real catalogue.

use banjak_core::{
    Effect, EffectInstance, FrameScheduler, FrameTick, MotionPreference, PointerTracker, Speed,
    StepCtx, Surface,
};
use banjak_effects::{
    Drift, DriftConfig, EffectKind, Liquid, LiquidConfig, Orbits, OrbitsConfig, Trail,
    TrailConfig,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZE: Vec2 = Vec2::new(80.0, 24.0);

fn ctx<'a>(
    frame: u64,
    pointer: Option<Vec2>,
    clicks: &'a [Vec2],
    rng: &'a mut StdRng,
) -> StepCtx<'a> {
    StepCtx {
        elapsed_ms: frame * 16,
        delta_ms: 16,
        size: SIZE,
        pointer,
        clicks,
        rng,
        speed: Speed::Normal,
    }
}

fn tick(frame: u64) -> FrameTick {
    FrameTick {
        elapsed_ms: frame * 16,
        delta_ms: 16,
    }
}

#[test]
fn fixed_pool_stays_at_nine_particles_for_a_thousand_frames() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut drift = Drift::new(DriftConfig {
        count: 9,
        ..DriftConfig::default()
    });
    drift.init(SIZE, &mut rng);

    let pointer = Some(Vec2::new(40.0, 12.0));
    let mut first_frame_count = None;
    for frame in 0..1000 {
        drift.step(&mut ctx(frame, pointer, &[], &mut rng));
        let count = drift.particles().count();
        first_frame_count.get_or_insert(count);
        assert_eq!(count, 9, "pool size changed at frame {frame}");
    }
    assert_eq!(first_frame_count, Some(9));
}

#[test]
fn drift_positions_stay_inside_the_surface() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut drift = Drift::new(DriftConfig {
        // Hot velocities to stress the reflection.
        max_speed: 60.0,
        ..DriftConfig::default()
    });
    drift.init(SIZE, &mut rng);

    for frame in 0..1000 {
        let pointer = Some(Vec2::new((frame % 80) as f32, (frame % 24) as f32));
        drift.step(&mut ctx(frame, pointer, &[], &mut rng));
        for p in drift.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= SIZE.x, "x escaped: {:?}", p.pos);
            assert!(p.pos.y >= 0.0 && p.pos.y <= SIZE.y, "y escaped: {:?}", p.pos);
        }
    }
}

#[test]
fn pointer_sitting_on_a_particle_never_corrupts_velocities() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut drift = Drift::new(DriftConfig::default());
    drift.init(SIZE, &mut rng);

    for frame in 0..50 {
        // Park the pointer exactly on the first particle every frame.
        let on_particle = drift.particles().next().map(|p| p.pos);
        drift.step(&mut ctx(frame, on_particle, &[], &mut rng));
        for p in drift.particles() {
            assert!(p.vel.x.is_finite() && p.vel.y.is_finite());
            assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
        }
    }
}

#[test]
fn trail_caps_live_particles_for_any_pointer_path() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut trail = Trail::new(TrailConfig {
        max_particles: 30,
        decay: 0.0, // nothing ever expires; only the cap can bound growth
        ..TrailConfig::default()
    });
    trail.init(SIZE, &mut rng);

    // 100 synthetic pointer positions, each more than one cell apart.
    for frame in 0..100 {
        let pointer = Vec2::new(
            (frame as f32 * 1.7) % SIZE.x,
            (frame as f32 * 1.3) % SIZE.y,
        );
        trail.step(&mut ctx(frame, Some(pointer), &[], &mut rng));
        assert!(
            trail.live_particles() <= 30,
            "trail exceeded its cap at frame {frame}"
        );
    }
    assert_eq!(trail.live_particles(), 30);
}

#[test]
fn reduced_motion_mounts_produce_a_static_paint_and_nothing_else() {
    for kind in EffectKind::all() {
        let mut instance = EffectInstance::new(
            kind.build_default(),
            80,
            24,
            7,
            Speed::Normal,
            MotionPreference::Reduced,
        );
        let mut scheduler = FrameScheduler::new();
        let tracker = PointerTracker::new();
        instance.start(&mut scheduler, &tracker);

        assert_eq!(scheduler.pending_count(), 0, "{} scheduled a frame", kind.name());
        for frame in 0..100 {
            scheduler.run_frame(tick(frame));
        }
        assert_eq!(instance.frames_stepped(), 0, "{} animated", kind.name());
    }
}

#[test]
fn degenerate_tuning_mounts_without_panicking() {
    let mut rng = StdRng::seed_from_u64(1);

    // Zeroed or inverted ranges straight from a user's config file.
    let mut drift = Drift::new(DriftConfig {
        max_speed: 0.0,
        ..DriftConfig::default()
    });
    drift.init(SIZE, &mut rng);
    drift.step(&mut ctx(0, Some(Vec2::new(1.0, 1.0)), &[], &mut rng));

    let mut liquid = Liquid::new(LiquidConfig {
        speed: 0.0,
        ..LiquidConfig::default()
    });
    liquid.init(SIZE, &mut rng);
    liquid.step(&mut ctx(0, None, &[], &mut rng));

    let mut trail = Trail::new(TrailConfig {
        scatter: 0.0,
        ..TrailConfig::default()
    });
    trail.init(SIZE, &mut rng);
    // A pointer is needed to reach the spawn path.
    trail.step(&mut ctx(0, Some(Vec2::new(5.0, 5.0)), &[], &mut rng));
    assert_eq!(trail.live_particles(), 1);

    let mut orbits = Orbits::new(OrbitsConfig {
        min_rate: 2.0,
        max_rate: 1.0,
        ..OrbitsConfig::default()
    });
    orbits.init(SIZE, &mut rng);
    orbits.step(&mut ctx(0, None, &[], &mut rng));
}

#[test]
fn reduced_motion_repaints_after_resize() {
    let mut instance = EffectInstance::new(
        EffectKind::Drift.build_default(),
        80,
        24,
        7,
        Speed::Normal,
        MotionPreference::Reduced,
    );
    let mut scheduler = FrameScheduler::new();
    let tracker = PointerTracker::new();
    instance.start(&mut scheduler, &tracker);
    assert!(instance.surface().total_luminance() > 0.0);

    instance.resize(81, 24);
    for frame in 0..10 {
        scheduler.run_frame(tick(frame));
    }
    // The cleared surface gets its static paint back; still zero frames.
    assert!(instance.surface().total_luminance() > 0.0);
    assert_eq!(instance.frames_stepped(), 0);
}

#[test]
fn stop_freezes_the_surface_against_pending_frames() {
    let mut instance = EffectInstance::new(
        EffectKind::Drift.build_default(),
        80,
        24,
        7,
        Speed::Normal,
        MotionPreference::Full,
    );
    let mut scheduler = FrameScheduler::new();
    let tracker = PointerTracker::new();
    instance.start(&mut scheduler, &tracker);
    for frame in 0..10 {
        scheduler.run_frame(tick(frame));
    }

    instance.stop(&mut scheduler);
    let frozen = instance.surface().total_luminance();
    let stepped = instance.frames_stepped();

    for frame in 10..200 {
        scheduler.run_frame(tick(frame));
    }
    assert_eq!(instance.surface().total_luminance(), frozen);
    assert_eq!(instance.frames_stepped(), stepped);
    assert_eq!(tracker.subscriber_count(), 0);
}

#[test]
fn resize_accepts_arbitrary_positive_dimensions() {
    let mut instance = EffectInstance::new(
        EffectKind::Aurora.build_default(),
        80,
        24,
        7,
        Speed::Normal,
        MotionPreference::Full,
    );
    for (w, h) in [(1, 1), (3, 200), (500, 2), (211, 59)] {
        instance.resize(w, h);
        assert_eq!(instance.surface().width(), w);
        assert_eq!(instance.surface().height(), h);
    }
}

#[test]
fn every_variant_survives_a_smoke_run() {
    for kind in EffectKind::all() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut effect = kind.build_default();
        let mut surface = Surface::new(80, 24);
        effect.init(SIZE, &mut rng);

        let clicks = [Vec2::new(40.0, 12.0)];
        for frame in 0..50 {
            let pointer = Some(Vec2::new((frame * 3 % 80) as f32, (frame % 24) as f32));
            effect.step(&mut ctx(frame, pointer, &clicks, &mut rng));
            effect.draw(&mut surface);
        }
        let total = surface.total_luminance();
        assert!(total.is_finite(), "{} produced non-finite output", kind.name());
        assert!(total > 0.0, "{} drew nothing", kind.name());
    }
}
