//! `docflow layout …`: inspect document layouts and download their images.

#[cfg(test)]
#[path = "layouts_test.rs"]
mod layouts_test;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use records::RecordId;
use records::resources::DocumentLayout;
use records::table::TableState;
use tracing::info;

use crate::api::{ImageDownload, RestClient};
use crate::error::ConsoleError;
use crate::output::{print_json, print_table};

#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Print a layout with its field regions.
    Get { id: RecordId },
    /// Download the reference image.
    Image {
        id: RecordId,
        /// Defaults to `layout-<id>.<ext>` in the working directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Delete { id: RecordId },
}

/// # Errors
///
/// Transport, server and file-system failures.
pub async fn run(client: &RestClient, command: LayoutCommand) -> Result<(), ConsoleError> {
    match command {
        LayoutCommand::List { search } => {
            let mut table = TableState::<DocumentLayout>::new();
            table.set_items(client.list(DocumentLayout::ENDPOINT).await?);
            table.set_query(search.unwrap_or_default());
            print_table(&table.visible());
            Ok(())
        }
        LayoutCommand::Get { id } => {
            let layout: DocumentLayout = client.get(&DocumentLayout::item_path(id)).await?;
            print_json(&layout)
        }
        LayoutCommand::Image { id, out } => {
            let (path, image) = download_image(client, id, out).await?;
            println!(
                "wrote {} ({} bytes, {})",
                path.display(),
                image.bytes.len(),
                dimensions_text(&image)
            );
            Ok(())
        }
        LayoutCommand::Delete { id } => {
            client.delete(&DocumentLayout::item_path(id)).await?;
            info!(id, "layout deleted");
            println!("deleted {id}");
            Ok(())
        }
    }
}

/// Fetch the image of layout `id` and write it to `out` or a default path.
///
/// # Errors
///
/// Transport and server failures, or the write failing.
pub async fn download_image(
    client: &RestClient,
    id: RecordId,
    out: Option<PathBuf>,
) -> Result<(PathBuf, ImageDownload), ConsoleError> {
    let image = client
        .fetch_image(
            &DocumentLayout::image_path(id),
            DocumentLayout::WIDTH_HEADER,
            DocumentLayout::HEIGHT_HEADER,
        )
        .await?;
    let path = out.unwrap_or_else(|| default_path(id, &image.content_type));
    write_file(&path, &image.bytes).await?;
    info!(id, path = %path.display(), bytes = image.bytes.len(), "layout image saved");
    Ok((path, image))
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ConsoleError> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

fn default_path(id: RecordId, content_type: &str) -> PathBuf {
    PathBuf::from(format!("layout-{id}.{}", extension(content_type)))
}

fn extension(content_type: &str) -> &'static str {
    match content_type.split(';').next().map(str::trim) {
        Some("image/png") => "png",
        Some("image/jpeg" | "image/jpg") => "jpg",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        Some("application/pdf") => "pdf",
        _ => "bin",
    }
}

fn dimensions_text(image: &ImageDownload) -> String {
    match (image.width, image.height) {
        (Some(w), Some(h)) => format!("{w}×{h}"),
        _ => "dimensions not reported".to_owned(),
    }
}
