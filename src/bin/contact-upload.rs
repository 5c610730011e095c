//! Terminal front-end for the upload widget.
//!
//! Validates a CSV locally, uploads it with a progress readout and prints
//! the resulting notification. `--list` prints the stored contacts after.

use clap::Parser;
use contact_importer::modules::upload::{
    MessageStatus, Notification, UploadClient, UploadWidget,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "contact-upload", about = "Upload a contacts CSV file")]
struct Args {
    /// CSV file with header First_Name,Last_Name,Country_Code,Whatsapp_Number,Email,Tags
    file: PathBuf,

    /// Base URL of the contact importer server
    #[arg(long, env = "CONTACTS_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,

    /// List stored contacts after a successful upload
    #[arg(long)]
    list: bool,
}

fn render(notification: &Mutex<Notification>) -> bool {
    let Ok(mut notification) = notification.lock() else {
        return false;
    };
    if !notification.is_visible() {
        return true;
    }

    let current = notification.current();
    let ok = current.status == MessageStatus::Success;
    if ok {
        println!("{}", current.message);
    } else {
        eprintln!("{}", current.message);
    }
    notification.dismiss();
    ok
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = UploadClient::new(&args.server_url);

    let notification = Arc::new(Mutex::new(Notification::default()));
    let sink = Arc::clone(&notification);
    let mut widget = UploadWidget::new(client.clone(), move |message| {
        if let Ok(mut n) = sink.lock() {
            n.show(message);
        }
    });

    if !widget.select_path(&args.file).await {
        render(&notification);
        std::process::exit(1);
    }

    let mut updates = WatchStream::new(widget.subscribe());
    let submit = widget.submit();
    tokio::pin!(submit);

    let mut printed = false;
    let message = loop {
        tokio::select! {
            message = &mut submit => break message,
            Some(progress) = updates.next() => {
                if progress.loading {
                    eprint!("\rUploading... {:>3}%", progress.percent);
                    printed = true;
                }
            }
        }
    };
    if printed {
        eprintln!();
    }

    if !render(&notification) {
        std::process::exit(1);
    }

    if args.list && message.status == MessageStatus::Success {
        let contacts = client.list_contacts().await?;
        println!("{} contacts stored:", contacts.len());
        for c in contacts {
            println!(
                "  {} {} | {} {} | {} | {}",
                c.first_name, c.last_name, c.country_code, c.whatsapp_number, c.email, c.tags
            );
        }
    }

    Ok(())
}
