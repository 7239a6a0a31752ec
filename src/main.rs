use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use deprisk::adapters::outbound::console::StderrProgressReporter;
use deprisk::adapters::outbound::filesystem::{FileWriter, StdoutPresenter};
use deprisk::adapters::outbound::network::{
    CachingDependencyListing, HttpDependencyListing, OsvQueryClient, RegistryEndpoints,
    RegistryVersionResolver,
};
use deprisk::application::dto::{ExploreOptions, ExploreQuery};
use deprisk::application::navigation::{NavigationController, SessionContext};
use deprisk::application::use_cases::ExploreDependenciesUseCase;
use deprisk::cli::{Args, ReportFormat};
use deprisk::config::{discover_config, load_config_from_path, ConfigFile, RegistryOverrides};
use deprisk::ports::outbound::{OutputPresenter, ProgressReporter, SilentProgressReporter};
use deprisk::shared::Result;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();

    let config = match &args.config {
        Some(path) => load_config_from_path(Path::new(path))?,
        None => discover_config(Path::new("."))?.unwrap_or_default(),
    };

    let api_base = args
        .api_base
        .clone()
        .or_else(|| config.api_base.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // CLI wins over config; config fills the default.
    let format = args
        .format
        .or_else(|| config.format.as_deref().and_then(|name| name.parse().ok()))
        .unwrap_or(ReportFormat::Tree);

    let reporter: Arc<dyn ProgressReporter> = if args.quiet {
        Arc::new(SilentProgressReporter)
    } else {
        Arc::new(StderrProgressReporter::new())
    };

    let resolver = RegistryVersionResolver::with_endpoints(registry_endpoints(&config))?;
    let listing = CachingDependencyListing::new(
        HttpDependencyListing::new(api_base)?.with_reporter(reporter.clone()),
    );
    let osv = OsvQueryClient::new()?;

    let use_case =
        ExploreDependenciesUseCase::new(resolver, listing, osv, ForwardingReporter(reporter));

    let options = ExploreOptions {
        include_transitive: !args.no_transitive && config.include_transitive.unwrap_or(true),
        include_vuln: !args.no_vuln && config.include_vuln.unwrap_or(true),
        include_scorecard: args.scorecard || config.include_scorecard.unwrap_or(false),
    };
    let session = SessionContext::new(
        ExploreQuery::new(args.ecosystem, args.namespace.clone(), ""),
        options,
    );
    let mut controller = NavigationController::new(use_case, session);

    // Ctrl-C aborts the in-flight fetch instead of killing the process
    // mid-write; a cancelled run simply produces no report.
    let cancel = controller.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut query = ExploreQuery::new(args.ecosystem, args.namespace.clone(), args.name.clone());
    if let Some(version) = &args.version {
        query = query.with_version(version.clone());
    }

    let Some(outcome) = controller.submit(query).await? else {
        return Ok(());
    };

    let color = args.output.is_none();
    let formatter = format.create_formatter(color);
    let rendered = formatter.format(outcome)?;

    let presenter: Box<dyn OutputPresenter> = match &args.output {
        Some(path) => Box::new(FileWriter::new(PathBuf::from(path))),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&rendered)?;

    Ok(())
}

fn registry_endpoints(config: &ConfigFile) -> RegistryEndpoints {
    let mut endpoints = RegistryEndpoints::default();
    if let Some(RegistryOverrides {
        npm,
        pypi,
        go,
        maven,
        cargo,
        rubygems,
        nuget,
        composer,
    }) = &config.registries
    {
        let apply = |target: &mut String, value: &Option<String>| {
            if let Some(url) = value {
                *target = url.trim_end_matches('/').to_string();
            }
        };
        apply(&mut endpoints.npm, npm);
        apply(&mut endpoints.pypi, pypi);
        apply(&mut endpoints.go, go);
        apply(&mut endpoints.maven, maven);
        apply(&mut endpoints.cargo, cargo);
        apply(&mut endpoints.rubygems, rubygems);
        apply(&mut endpoints.nuget, nuget);
        apply(&mut endpoints.composer, composer);
    }
    endpoints
}

/// Adapts an `Arc<dyn ProgressReporter>` to the use case's generic slot.
struct ForwardingReporter(Arc<dyn ProgressReporter>);

impl ProgressReporter for ForwardingReporter {
    fn report(&self, message: &str) {
        self.0.report(message);
    }

    fn request_line(&self, line: &str) {
        self.0.request_line(line);
    }

    fn report_warning(&self, message: &str) {
        self.0.report_warning(message);
    }

    fn report_completion(&self, message: &str) {
        self.0.report_completion(message);
    }
}
