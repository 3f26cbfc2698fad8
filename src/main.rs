use clap::Parser;
use upload_step::utils::{logger, validation::Validate};
use upload_step::{
    resolve_operation, ExtensionFormatService, FilePayload, InMemoryContentService,
    JsonDescriptorBuilder, MapHandlerRegistry, PatchInstruction, RequestContext, StepConfig,
    Submission, UploadStep,
};

/// Demo driver: ingests files into an in-memory submission and prints
/// the resulting upload-step snapshot.
#[derive(Parser, Debug)]
#[command(name = "upload-step")]
struct Args {
    /// Path to the TOML step configuration
    #[arg(short, long, default_value = "step.toml")]
    config: String,

    /// JSON file containing an array of patch instructions; each one is
    /// resolved against the dispatch table and reported
    #[arg(short, long)]
    patch: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Files to ingest, in order
    files: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting upload-step demo");

    let config = match StepConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load step configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let step = UploadStep::new(
        InMemoryContentService::new(),
        ExtensionFormatService::new(),
        MapHandlerRegistry::new(),
        JsonDescriptorBuilder::new(),
    );

    let ctx = RequestContext::new();
    let submission = Submission::new();

    for file in &args.files {
        let data = tokio::fs::read(file).await?;
        let payload = FilePayload::new(file.clone(), data);

        match step.upload(&ctx, &submission, &config, payload).await {
            None => println!("✅ Ingested {}", file),
            Some(report) => {
                eprintln!("❌ Upload of {} failed: {}", file, report.message);
                eprintln!("   at {}", report.paths.join(", "));
                std::process::exit(1);
            }
        }
    }

    if let Some(patch_file) = &args.patch {
        let content = tokio::fs::read_to_string(patch_file).await?;
        let instructions: Vec<PatchInstruction> = serde_json::from_str(&content)?;

        for instruction in &instructions {
            match resolve_operation(instruction.op, &instruction.path, config.step_type()) {
                Some(operation) => {
                    println!("{} {} -> {}", instruction.op, instruction.path, operation)
                }
                None => println!(
                    "{} {} -> unsupported by this step",
                    instruction.op, instruction.path
                ),
            }
        }
    }

    let data = step.get_data(&ctx, &submission).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
