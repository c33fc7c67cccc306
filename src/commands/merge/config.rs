use super::*;

/// Sources read when neither paths nor a manifest are given.
const DEFAULT_SOURCES: [&str; 5] = [
    "extracted_data_225.csv",
    "extracted_data_226.csv",
    "extracted_data_227.csv",
    "extracted_data_228.csv",
    "extracted_data_229.csv",
];

#[derive(Debug, Clone)]
pub(super) struct PipelineConfig {
    pub sources: Vec<SourceDescriptor>,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub dedup: DedupPolicy,
}

impl PipelineConfig {
    pub(super) fn from_args(args: &MergeArgs) -> Result<Self> {
        let sources = if !args.sources.is_empty() {
            args.sources
                .iter()
                .cloned()
                .map(SourceDescriptor::from_path)
                .collect()
        } else if let Some(manifest_path) = &args.sources_manifest {
            load_sources_manifest(manifest_path)?
        } else {
            info!("no sources given; using the default extracted_data file list");
            default_sources()
        };

        Ok(Self {
            sources,
            output_path: args.output.clone(),
            report_path: args.report_path.clone(),
            dedup: DedupPolicy {
                keep_blank_identifiers: args.keep_blank_identifiers,
            },
        })
    }
}

pub(super) fn default_sources() -> Vec<SourceDescriptor> {
    DEFAULT_SOURCES
        .iter()
        .map(|path| SourceDescriptor::from_path(*path))
        .collect()
}

/// Reads a sources manifest; relative paths resolve against the manifest's directory.
pub(super) fn load_sources_manifest(manifest_path: &Path) -> Result<Vec<SourceDescriptor>> {
    let raw = fs::read(manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let manifest: SourcesManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    if manifest.sources.is_empty() {
        bail!("sources manifest lists no sources: {}", manifest_path.display());
    }

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let sources = manifest
        .sources
        .into_iter()
        .map(|source| SourceDescriptor {
            path: if source.path.is_absolute() {
                source.path
            } else {
                base_dir.join(source.path)
            },
            label: source.label,
        })
        .collect::<Vec<SourceDescriptor>>();

    info!(
        path = %manifest_path.display(),
        source_count = sources.len(),
        "loaded sources manifest"
    );

    Ok(sources)
}
