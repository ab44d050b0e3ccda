//! End-to-end tour of the façade: upload, list, stat, download, copy, move
//! and delete.
//!
//! Runs against whatever `STORAGE_BACKEND` selects (in-memory by default):
//!
//! ```sh
//! STORAGE_BACKEND=gcs GCS_BUCKET=my-bucket GCP_PROJECT_ID=my-project \
//!     cargo run --example walkthrough
//! ```
use bucket_crud::{create_app_from_env, BucketName, ObjectKey, ObjectService, UploadSource};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    dotenvy::dotenv().ok();
    let service = create_app_from_env()?;

    let bucket = BucketName::new(
        std::env::var("GCS_BUCKET").unwrap_or_else(|_| "walkthrough-bucket".to_string()),
    )?;

    let scratch = tempfile::tempdir()?;
    let source_file = scratch.path().join("hello.txt");
    std::fs::write(&source_file, b"Hello from the bucket walkthrough!\n")?;

    let hello = ObjectKey::new("examples/hello.txt")?;
    let copy = ObjectKey::new("examples/hello-copy.txt")?;
    let moved = ObjectKey::new("examples/hello-moved.txt")?;

    println!("Uploading file...");
    let uri = service
        .upload(&bucket, &hello, UploadSource::Path(source_file), Some("text/plain"))
        .await?;
    println!("Uploaded to: {}", uri);

    println!("Listing objects with prefix 'examples/'...");
    println!("{:?}", service.list_objects(&bucket, "examples/").await?);

    println!("Getting metadata...");
    println!("{}", serde_json::to_string_pretty(&service.stat(&bucket, &hello).await?)?);

    println!("Downloading to bytes...");
    let data = service.download_bytes(&bucket, &hello).await?;
    println!("Downloaded bytes: {:?}", String::from_utf8_lossy(&data));

    println!("Copying object...");
    println!("Copied to: {}", service.copy_object(&bucket, &hello, &bucket, &copy).await?);

    println!("Moving object...");
    println!("Moved to: {}", service.move_object(&bucket, &copy, &bucket, &moved).await?);

    println!("Downloading to local file...");
    let local = scratch.path().join("downloads").join("hello-downloaded.txt");
    println!("{}", service.download_to_file(&bucket, &hello, &local).await?.display());

    println!("Deleting original and moved objects...");
    service.delete_object(&bucket, &hello).await?;
    service.delete_object(&bucket, &moved).await?;

    Ok(())
}
