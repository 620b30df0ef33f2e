use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use blockmotion::{
    BlockDag, ConsensusRegistry, DagLayout, Fps, GridPos, JsonLinesSink, Rgb8, Scene,
};

#[derive(Parser, Debug)]
#[command(name = "blockmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a built-in demo scene and write one JSON snapshot per frame.
    Demo(DemoArgs),
    /// Print timeline statistics for a built-in demo scene.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Demo scene to run.
    #[arg(long, value_enum)]
    name: DemoName,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Demo scene to inspect.
    #[arg(long, value_enum)]
    name: DemoName,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemoName {
    /// A single chain with a mid-timeline genesis relocation.
    Chain,
    /// A nakamoto fork: two competing tips, loser recolored red.
    Fork,
    /// A small ghostdag merge.
    Ghostdag,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let (scene, _dag) = build_demo(args.name, fps)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut sink = JsonLinesSink::create(&args.out)?;
    let stats = scene.render_into(&mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_emitted,
        args.out.display()
    );
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let (scene, dag) = build_demo(args.name, fps)?;
    println!("consensus:   {}", dag.consensus());
    println!("blocks:      {}", dag.blocks().len());
    println!("connections: {}", dag.connections().len());
    println!("entities:    {}", scene.entity_count());
    println!("groups:      {}", scene.timeline().len());
    println!("frames:      {}", scene.timeline().total_frames());
    println!(
        "duration:    {:.2}s",
        fps.frames_to_secs(scene.timeline().total_frames())
    );
    Ok(())
}

fn build_demo(name: DemoName, fps: Fps) -> anyhow::Result<(Scene, BlockDag)> {
    match name {
        DemoName::Chain => build_chain(fps),
        DemoName::Fork => build_fork(fps),
        DemoName::Ghostdag => build_ghostdag(fps),
    }
}

/// Straight chain, with the genesis relocated mid-timeline so later blocks
/// demonstrate activation-time placement.
fn build_chain(fps: Fps) -> anyhow::Result<(Scene, BlockDag)> {
    let mut scene = Scene::new(fps);
    let mut dag = BlockDag::new(
        "basic",
        ConsensusRegistry::with_defaults(),
        DagLayout::default(),
    )?;

    let genesis = dag.add_block(&mut scene, "G", vec![])?;
    scene.play(genesis)?;
    scene.wait_secs(0.5)?;
    let a = dag.add_block(&mut scene, "A", vec!["G".into()])?;
    scene.play(a)?;

    // Relocate the genesis; the next block still lands correctly because its
    // position resolves only when its own animation activates.
    let move_frames = fps.secs_to_frames(1.0)?;
    let relocate = dag.move_block("G", GridPos::new(10.0, 40.0), move_frames)?;
    scene.play(relocate)?;
    let b = dag.add_block(&mut scene, "B", vec!["A".into()])?;
    scene.play(b)?;
    let c = dag.add_block(&mut scene, "C", vec!["B".into()])?;
    scene.play(c)?;
    scene.wait_secs(1.0)?;

    Ok((scene, dag))
}

/// Competing nakamoto tips: the losing fork fades to red.
fn build_fork(fps: Fps) -> anyhow::Result<(Scene, BlockDag)> {
    let mut scene = Scene::new(fps);
    let mut dag = BlockDag::new(
        "nakamoto",
        ConsensusRegistry::with_defaults(),
        DagLayout::default(),
    )?;

    for (id, parents) in [
        ("G", vec![]),
        ("A", vec!["G".into()]),
        ("B", vec!["A".into()]),
        // Fork off A, then let the original tip win.
        ("B2", vec!["A".into()]),
        ("C", vec!["B".into()]),
    ] {
        let added = dag.add_block(&mut scene, id, parents)?;
        scene.play(added)?;
    }
    scene.wait_secs(0.5)?;

    let recolor_frames = fps.secs_to_frames(0.5)?;
    let winners = ["G", "A", "B", "C"]
        .iter()
        .map(|id| dag.recolor_block(id, Rgb8::BLUE, recolor_frames))
        .collect::<Result<Vec<_>, _>>()?;
    scene.play(winners)?;
    scene.play(dag.recolor_block("B2", Rgb8::RED, recolor_frames)?)?;
    scene.wait_secs(1.0)?;

    Ok((scene, dag))
}

/// Two parallel tips merged by a multi-parent ghostdag block.
fn build_ghostdag(fps: Fps) -> anyhow::Result<(Scene, BlockDag)> {
    let mut scene = Scene::new(fps);
    let mut dag = BlockDag::new(
        "ghostdag",
        ConsensusRegistry::with_defaults(),
        DagLayout::default(),
    )?;

    for (id, parents) in [
        ("G", vec![]),
        ("A", vec!["G".into()]),
        ("B", vec!["G".into()]),
        ("C", vec!["A".into(), "B".into()]),
        ("D", vec!["C".into()]),
    ] {
        let added = dag.add_block(&mut scene, id, parents)?;
        scene.play(added)?;
    }
    scene.wait_secs(1.0)?;

    Ok((scene, dag))
}
