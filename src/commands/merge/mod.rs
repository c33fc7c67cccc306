use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cli::MergeArgs;
use crate::model::{
    Gender, MergeCounts, MergeRunReport, RawRow, RelationType, SourceDescriptor, SourceStatus,
    SourceSummary, SourcesManifest, VoterRecord, VoterRow,
};
use crate::stats::StatisticsReport;
use crate::util::{now_utc_string, sha256_file, write_atomically, write_json_pretty};

const REPORT_VERSION: u32 = 1;

mod config;
mod dedup;
mod fields;
mod output;
mod record;
mod run;
mod source;

pub use output::{print_statistics, read_merged_csv};
pub use run::run;

use config::*;
use dedup::*;
use fields::*;
use output::*;
use record::*;
use source::*;
