use anyhow::{Context, Result};
use bucket_crud::{
    AppBuilder, AppConfig, BucketName, ObjectKey, ObjectService, ObjectServiceImpl, ProjectId,
    StorageBackend, UploadOptions, UploadSource,
};
use clap::{Parser, Subcommand};
use std::{io::Write, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bucket-crud")]
#[command(about = "Upload, download, list, inspect, copy, move and delete bucket objects", long_about = None)]
struct Cli {
    /// Storage backend: gcs, s3, local or memory
    #[arg(long, env = "STORAGE_BACKEND", default_value = "gcs")]
    backend: String,

    /// Root directory for the local backend (one sub-directory per bucket)
    #[arg(long, env = "LOCAL_STORAGE_ROOT")]
    local_root: Option<PathBuf>,

    /// Project to run requests under; ambient default when omitted
    #[arg(long, env = "GCP_PROJECT_ID")]
    project: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a local file
    Upload {
        bucket: String,
        key: String,
        file: PathBuf,
        /// Content type; guessed from the file extension when omitted
        #[arg(long)]
        content_type: Option<String>,
        /// Custom metadata as KEY=VALUE, repeatable
        #[arg(long = "meta", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,
    },

    /// Upload the given text as the object body
    UploadBytes {
        bucket: String,
        key: String,
        content: String,
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Download an object to a file, or to stdout without --output
    Download {
        bucket: String,
        key: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List object keys
    List {
        bucket: String,
        /// Only keys starting with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Print object metadata as JSON
    Stat { bucket: String, key: String },

    /// Delete an object; succeeds even if it is already gone
    Delete {
        bucket: String,
        key: String,
        /// Report backend failures instead of ignoring them
        #[arg(long)]
        strict: bool,
    },

    /// Copy an object
    Copy {
        source_bucket: String,
        source_key: String,
        destination_bucket: String,
        destination_key: String,
    },

    /// Move an object (copy, then delete the source)
    Move {
        source_bucket: String,
        source_key: String,
        destination_bucket: String,
        destination_key: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = StorageBackend::from_name(&self.backend, self.local_root.clone())?;
        let project_id = self
            .project
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(ProjectId::new)
            .transpose()
            .context("Invalid --project")?;

        Ok(AppConfig {
            storage_backend,
            project_id,
        })
    }

    fn init_logging(&self) {
        let filter =
            EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn bucket(name: &str) -> Result<BucketName> {
    BucketName::new(name).with_context(|| format!("Invalid bucket name `{}`", name))
}

fn key(name: &str) -> Result<ObjectKey> {
    ObjectKey::new(name).with_context(|| format!("Invalid object key `{}`", name))
}

async fn run(service: &ObjectServiceImpl, command: Commands) -> Result<()> {
    match command {
        Commands::Upload {
            bucket: b,
            key: k,
            file,
            content_type,
            metadata,
        } => {
            let options = UploadOptions {
                content_type,
                metadata: metadata.into_iter().collect(),
            };
            let locator = service
                .upload_with_options(&bucket(&b)?, &key(&k)?, UploadSource::Path(file), options)
                .await?;
            println!("{}", locator);
        }
        Commands::UploadBytes {
            bucket: b,
            key: k,
            content,
            content_type,
        } => {
            let locator = service
                .upload(
                    &bucket(&b)?,
                    &key(&k)?,
                    content.into_bytes().into(),
                    content_type.as_deref(),
                )
                .await?;
            println!("{}", locator);
        }
        Commands::Download {
            bucket: b,
            key: k,
            output: Some(path),
        } => {
            let path = service.download_to_file(&bucket(&b)?, &key(&k)?, &path).await?;
            println!("{}", path.display());
        }
        Commands::Download {
            bucket: b,
            key: k,
            output: None,
        } => {
            let data = service.download_bytes(&bucket(&b)?, &key(&k)?).await?;
            std::io::stdout()
                .write_all(&data)
                .context("Failed to write object to stdout")?;
        }
        Commands::List { bucket: b, prefix } => {
            for name in service.list_objects(&bucket(&b)?, &prefix).await? {
                println!("{}", name);
            }
        }
        Commands::Stat { bucket: b, key: k } => {
            let metadata = service.stat(&bucket(&b)?, &key(&k)?).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Delete {
            bucket: b,
            key: k,
            strict,
        } => {
            if strict {
                service.delete_object_strict(&bucket(&b)?, &key(&k)?).await?;
            } else {
                service.delete_object(&bucket(&b)?, &key(&k)?).await?;
            }
        }
        Commands::Copy {
            source_bucket,
            source_key,
            destination_bucket,
            destination_key,
        } => {
            let locator = service
                .copy_object(
                    &bucket(&source_bucket)?,
                    &key(&source_key)?,
                    &bucket(&destination_bucket)?,
                    &key(&destination_key)?,
                )
                .await?;
            println!("{}", locator);
        }
        Commands::Move {
            source_bucket,
            source_key,
            destination_bucket,
            destination_key,
        } => {
            let locator = service
                .move_object(
                    &bucket(&source_bucket)?,
                    &key(&source_key)?,
                    &bucket(&destination_bucket)?,
                    &key(&destination_key)?,
                )
                .await?;
            println!("{}", locator);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    let config = cli.to_app_config()?;
    tracing::debug!(?config, "Resolved configuration");

    let service = AppBuilder::new().with_config(config).build();
    run(&service, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "bucket-crud",
            "--backend",
            "memory",
            "--project",
            "learn-cloud-473302",
            "upload",
            "my-bucket",
            "examples/hello.txt",
            "/tmp/hello.txt",
            "--meta",
            "owner=me",
        ]);

        assert_eq!(cli.backend, "memory");
        match &cli.command {
            Commands::Upload { key, metadata, .. } => {
                assert_eq!(key, "examples/hello.txt");
                assert_eq!(metadata, &vec![("owner".to_string(), "me".to_string())]);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let config = cli.to_app_config().unwrap();
        assert_eq!(config.storage_backend, StorageBackend::InMemory);
        assert_eq!(
            config.project_id.as_ref().map(ProjectId::as_str),
            Some("learn-cloud-473302")
        );
    }

    #[test]
    fn test_invalid_metadata_pair_is_rejected() {
        assert!(parse_key_val("novalue").is_err());
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }

    #[test]
    fn test_local_backend_requires_root() {
        let mut cli = Cli::parse_from(["bucket-crud", "--backend", "local", "list", "my-bucket"]);
        cli.local_root = None;
        cli.project = None;
        assert!(cli.to_app_config().is_err());

        cli.local_root = Some(PathBuf::from("/data"));
        assert_eq!(
            cli.to_app_config().unwrap().storage_backend,
            StorageBackend::LocalFileSystem {
                root: PathBuf::from("/data")
            }
        );
    }

    #[tokio::test]
    async fn test_run_against_memory_backend() {
        let service = bucket_crud::create_in_memory_app();

        run(
            &service,
            Commands::UploadBytes {
                bucket: "my-bucket".to_string(),
                key: "a/x".to_string(),
                content: "hello".to_string(),
                content_type: None,
            },
        )
        .await
        .unwrap();

        run(
            &service,
            Commands::Move {
                source_bucket: "my-bucket".to_string(),
                source_key: "a/x".to_string(),
                destination_bucket: "my-bucket".to_string(),
                destination_key: "b/y".to_string(),
            },
        )
        .await
        .unwrap();

        let keys = service
            .list_objects(&BucketName::new("my-bucket").unwrap(), "")
            .await
            .unwrap();
        assert_eq!(keys, vec!["b/y"]);
    }
}
