//! Record and Replay
//!
//! This example records a short pick-and-place sequence on a simulated arm,
//! saves it, and replays it from disk in both replay modes.
//!
//! Key concepts:
//! - Jogging joints through the controller
//! - Recording poses from the commanded arm state
//! - Atomic save and validated load
//! - Sequential vs interleaved replay
//! - Virtual time instead of real sleeps
//!
//! Run with: cargo run --example record_and_replay

use poseplay::actuator::SimulatedActuator;
use poseplay::config::ArmConfig;
use poseplay::controller::ArmController;
use poseplay::core::Joint;
use poseplay::motion::VirtualClock;
use poseplay::sequence::ReplayMode;
use std::path::Path;

fn controller(path: &Path, mode: ReplayMode) -> ArmController<SimulatedActuator, VirtualClock> {
    ArmController::builder()
        .actuator(SimulatedActuator::new().with_angles([90.0; 4]))
        .sleeper(VirtualClock::new())
        .config(ArmConfig {
            sequence_path: path.to_path_buf(),
            replay_mode: mode,
            ..ArmConfig::default()
        })
        .build()
        .unwrap()
}

fn main() {
    println!("=== Record and Replay ===\n");

    let path = std::env::temp_dir().join("poseplay-demo-sequence.json");
    let mut arm = controller(&path, ReplayMode::Sequential);

    // Home pose, reach down, close the gripper, lift
    arm.record_step();
    arm.move_servo(Joint::Base, -30.0).unwrap();
    arm.move_servo(Joint::Shoulder, 35.0).unwrap();
    arm.record_step();
    arm.move_servo(Joint::Gripper, -60.0).unwrap();
    arm.record_step();
    arm.move_servo(Joint::Shoulder, -35.0).unwrap();
    arm.record_step();

    println!("Recorded {} poses:", arm.sequence().len());
    for (i, pose) in arm.sequence().iter().enumerate() {
        println!("  #{i}: {:?} hold {}s", pose.angles, pose.duration);
    }

    arm.save().unwrap();
    println!("\nSaved to {}\n", path.display());

    for mode in [ReplayMode::Sequential, ReplayMode::Interleaved] {
        let mut replayer = controller(&path, mode);
        let playback = replayer.load_and_replay();
        let rig = replayer.rig();

        println!("{mode:?} replay:");
        println!("  poses played:  {}", playback.result.unwrap());
        println!("  servo writes:  {}", rig.actuator.write_count());
        println!("  virtual time:  {:?}", rig.sleeper.elapsed());
        println!("  final angles:  {:?}\n", replayer.state().angles());
    }

    std::fs::remove_file(&path).ok();
    println!("=== Example Complete ===");
}
