//! Basic SITL example: run the demonstration routine on the kinematic sink.
//!
//! Creates a shared clock, connects a kinematic sink, runs the routine with
//! delays scaled 4x faster than real time, and prints the pose after each
//! step of the timeline.
//!
//! Run with: `cargo run -p robosim_sitl --example basic_sitl`

use robosim_sitl::routine::run_steps;
use robosim_sitl::{KinematicSink, SimClock, SimDelay, TimeMode, DEMO_STEPS};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== robosim SITL Basic Example ===\n");

    // 1. Shared simulated clock
    let clock = SimClock::new();

    // 2. Kinematic sink, reset to the origin
    let mut sink = KinematicSink::with_defaults(clock.clone());
    sink.connect();

    // 3. Delays run 4x faster than wall-clock time
    let mut delay = SimDelay::new(clock.clone(), TimeMode::Scaled { factor: 4.0 });

    // 4. Walk the routine one step at a time
    for (i, step) in DEMO_STEPS.iter().enumerate() {
        run_steps(std::slice::from_ref(step), &mut sink, &mut delay)
            .await
            .expect("Step failed");

        let pose = sink.pose();
        println!(
            "Step {} {:?}\n  t={:.2}s x={:.3} y={:.3} heading={:.3}",
            i + 1,
            step,
            pose.time,
            pose.x,
            pose.y,
            sink.heading()
        );
    }

    println!("\nRoutine complete. Final time: {:.2}s", clock.now_secs());
}
