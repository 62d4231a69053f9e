mod color;
mod data;
mod pipeline;
mod plot;
mod settings;

use settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::default();
    let outputs = pipeline::run(&settings)?;
    log::info!("Plotted {} records", outputs.rows);

    println!(
        "Gráficos guardados como {} y {}",
        outputs.histogram.display(),
        outputs.scatter.display()
    );
    Ok(())
}
