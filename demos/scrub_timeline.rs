use baseplate_timeline::{Ease, InMemoryHost, Snapshot, TargetId, Timeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let ball = TargetId::new("ball");
    let mut host = InMemoryHost::new();
    host.insert(
        ball.clone(),
        Snapshot::new().with("cx", 20.0).with("cy", 80.0).with("fill", "#e33"),
    );

    let mut tl = Timeline::new();
    tl.capture_keyframe(&host, ball.clone(), 0.0, Some(Ease::Linear))?;
    tl.add_keyframe(
        ball.clone(),
        1.0,
        Snapshot::new().with("cx", 120.0).with("cy", 20.0).with("fill", "#3e3"),
        Some(Ease::OutQuad),
    )?;
    tl.add_keyframe(
        ball.clone(),
        2.0,
        Snapshot::new().with("cx", 220.0).with("cy", 80.0).with("fill", "#33e"),
        Some(Ease::OutBounce),
    )?;

    println!("ruler:");
    for tick in tl.view().ruler_ticks(tl.duration()) {
        println!("  {:>6.1}px {}", tick.offset_px, tick.label.unwrap_or_default());
    }

    println!("scrub:");
    for step in 0..=8 {
        let t = step as f64 * 0.25;
        tl.seek_to(t, &mut host);
        let live = host
            .properties(&ball)
            .ok_or_else(|| anyhow::anyhow!("ball disappeared from host"))?;
        println!("  t={t:.2} {}", serde_json::to_string(live)?);
    }

    println!("play at 60 fps for 3 s (loops):");
    tl.stop_and_rewind(&mut host);
    tl.play();
    for frame in 1..=180 {
        tl.tick(1.0 / 60.0, &mut host);
        if frame % 30 == 0 {
            println!("  frame {frame:>3} t={:.3}", tl.current_time());
        }
    }
    tl.stop();

    println!("{}", tl.to_json()?);
    Ok(())
}
