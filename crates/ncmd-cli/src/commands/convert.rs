use crate::cli::ConvertArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ncmd::workflows;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    info!("Converting {:?} into {:?}", &args.input, &args.output);

    let progress_handler = CliProgressHandler::new("frames");
    let reporter = progress_handler.reporter();

    let frames = workflows::convert::convert_file(
        &args.input,
        args.format.map(Into::into),
        &args.output,
        &reporter,
    )?;

    println!(
        "✓ {} frame(s) appended to: {}",
        frames,
        args.output.display()
    );
    Ok(())
}
