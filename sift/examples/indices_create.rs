//! Creates an index on the node named by `SIFT_URL` (default
//! `http://localhost:9200`) and prints the engine's reply.
//!
//! ```sh
//! SIFT_URL=http://localhost:9200 cargo run -p sift --example indices_create -- my-index
//! ```

use std::time::Duration;

use sift::api::IndicesCreate;
use sift::{Client, SiftError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SiftError> {
    let index = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sift-example".to_string());

    let client = Client::new()?;
    let response = client
        .indices()
        .create(
            &index,
            [
                IndicesCreate::with_body(
                    r#"{"settings":{"number_of_shards":1,"number_of_replicas":0}}"#,
                ),
                IndicesCreate::with_request_timeout(Duration::from_secs(10)),
                IndicesCreate::with_pretty(),
            ],
        )
        .await?;

    println!("{response}");
    println!("{}", response.text().await?);
    Ok(())
}
