// ============================================
// src/cli.rs
// Command line options and default locations
// ============================================

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;

use crate::drills::{Activity, ContentPaths};
use crate::filter::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Parser)]
#[command(name = "practica")]
#[command(about = "Spanish practice drills in the terminal")]
pub struct Cli {
    #[arg(value_enum, help = "Activity to start with", default_value_t = Activity::Courtesy)]
    pub activity: Activity,

    #[arg(long, help = "Directory holding the JSON content documents")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Content document for the generic scenario activity")]
    pub file: Option<PathBuf>,

    #[arg(long, help = "Seed for a repeatable order of questions")]
    pub seed: Option<u64>,

    #[arg(
        long,
        help = "Draws tried before giving up on a conversation",
        default_value_t = DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    #[arg(long, help = "Directory for log files")]
    pub log_dir: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "practica", "practica")
}

impl Cli {
    /// `--data-dir`, else the platform data directory if it exists, else `./data`.
    pub fn content_paths(&self) -> ContentPaths {
        let data_dir = self.data_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .filter(|dir| dir.exists())
                .unwrap_or_else(|| PathBuf::from("data"))
        });
        ContentPaths {
            data_dir,
            scenarios_file: self.file.clone(),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_local_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["practica"]);
        assert_eq!(cli.activity, Activity::Courtesy);
        assert_eq!(cli.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn explicit_paths_win() {
        let cli = Cli::parse_from([
            "practica",
            "then-and-now",
            "--data-dir",
            "/tmp/contenido",
            "--file",
            "/tmp/otro.json",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.activity, Activity::ThenAndNow);
        assert_eq!(cli.seed, Some(7));
        let paths = cli.content_paths();
        assert_eq!(paths.courtesy(), PathBuf::from("/tmp/contenido/courtesy-expressions.json"));
        assert_eq!(paths.scenarios(), PathBuf::from("/tmp/otro.json"));
    }
}
