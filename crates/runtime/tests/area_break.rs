//! Destructive casts: the resolved block is handed to the area breaker.
use glam::IVec3;
use runtime::{CastDriver, Sandbox, SandboxConfig};
use targeting_content::{SceneLoader, SkillDefinition};
use targeting_core::{BREAK_EFFECT, BlockRef, ParameterMap, TargetingResult, WorldId};

/// Caster looking north at a breakable 3x3 wall centred on (0, 64, 3), backed
/// by an indestructible layer at z = 4.
const QUARRY: &str = r#"
(
    worlds: [(name: "overworld")],
    blocks: [
        (world: "overworld", pos: (-1, 63, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (0, 63, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (1, 63, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (-1, 64, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (0, 64, 3), resistance: Some(1.0), reflective: true),
        (world: "overworld", pos: (1, 64, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (-1, 65, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (0, 65, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (1, 65, 3), resistance: Some(1.0)),
        (world: "overworld", pos: (0, 64, 4)),
    ],
    caster: (world: "overworld", position: (0.5, 64.5, 0.5)),
)
"#;

fn quarry() -> Sandbox {
    let scene = SceneLoader::parse(QUARRY).expect("valid scene");
    Sandbox::from_scene(&scene, &SandboxConfig::default()).expect("scene builds")
}

fn block(x: i32, y: i32, z: i32) -> BlockRef {
    BlockRef::new(WorldId(0), IVec3::new(x, y, z))
}

fn blast(amount: f64) -> SkillDefinition {
    SkillDefinition::new("blast")
        .with_range(8.0)
        .with_break_amount(amount)
        .with_parameters(ParameterMap::new().with("target", "block"))
}

#[test]
fn three_charges_break_up_the_wall() {
    let mut sandbox = quarry();
    let outcome = CastDriver::new()
        .cast(&mut sandbox, &blast(3.0))
        .expect("cast");

    assert_eq!(outcome.resolution.result, TargetingResult::Block);
    assert_eq!(outcome.resolution.target.block_ref(), Some(block(0, 64, 3)));

    // Hit block, then up, then east of that while the budget lasts.
    assert_eq!(outcome.broken_blocks, 3);
    assert_eq!(
        outcome.undo.blocks(),
        &[block(0, 64, 3), block(0, 65, 3), block(1, 65, 3)]
    );
    assert!(sandbox.worlds().is_empty_at(block(0, 64, 3)));
    assert!(sandbox.worlds().is_empty_at(block(1, 65, 3)));
    assert!(!sandbox.worlds().is_empty_at(block(0, 63, 3)));
    assert!(!sandbox.worlds().is_empty_at(block(0, 64, 4)));

    assert_eq!(outcome.effects.played().len(), 1);
    assert_eq!(outcome.effects.played()[0].key, BREAK_EFFECT);
}

#[test]
fn undo_restores_the_wall() {
    let mut sandbox = quarry();
    let before = sandbox.worlds().block_count(WorldId(0));
    let mut outcome = CastDriver::new()
        .cast(&mut sandbox, &blast(5.0))
        .expect("cast");
    assert!(outcome.broken_blocks > 1);
    assert_eq!(
        sandbox.worlds().block_count(WorldId(0)),
        before - outcome.broken_blocks as usize
    );

    let original = outcome.undo.original(block(0, 64, 3)).expect("recorded");
    assert!(original.reflective);

    let restored = outcome.undo.undo(sandbox.worlds_mut());
    assert_eq!(restored, outcome.broken_blocks as usize);
    assert_eq!(sandbox.worlds().block_count(WorldId(0)), before);
}

#[test]
fn indestructible_blocks_survive() {
    let mut sandbox = quarry();
    // The first cast always takes out the hit block, opening the back layer.
    let mut driver = CastDriver::new();
    driver.cast(&mut sandbox, &blast(9.0)).expect("first cast");
    assert!(sandbox.worlds().is_empty_at(block(0, 64, 3)));

    let outcome = driver.cast(&mut sandbox, &blast(9.0)).expect("cast");
    assert_eq!(outcome.resolution.target.block_ref(), Some(block(0, 64, 4)));
    assert_eq!(outcome.broken_blocks, 0);
    assert!(outcome.effects.played().is_empty());
    assert!(!sandbox.worlds().is_empty_at(block(0, 64, 4)));
}

#[test]
fn non_destructive_skills_break_nothing() {
    let mut sandbox = quarry();
    let look = SkillDefinition::new("look")
        .with_range(8.0)
        .with_parameters(ParameterMap::new().with("target", "block"));
    let outcome = CastDriver::new().cast(&mut sandbox, &look).expect("cast");
    assert_eq!(outcome.broken_blocks, 0);
    assert!(outcome.undo.is_empty());
    assert!(!sandbox.worlds().is_empty_at(block(0, 64, 3)));
}

#[test]
fn more_charges_never_break_less() {
    let mut last = 0;
    for amount in [1.0, 2.0, 3.0, 5.0, 8.0] {
        let mut sandbox = quarry();
        let outcome = CastDriver::new()
            .cast(&mut sandbox, &blast(amount))
            .expect("cast");
        assert!(outcome.broken_blocks >= last, "amount {amount}");
        last = outcome.broken_blocks;
    }
}
