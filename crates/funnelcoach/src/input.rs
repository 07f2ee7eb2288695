use crate::prelude::*;
use tokio::io::AsyncReadExt;

/// Read text from a file path, or from stdin when the source is `-`.
pub async fn read_text(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .wrap_err("Failed to read from stdin")?;
        return Ok(buffer);
    }

    tokio::fs::read_to_string(source)
        .await
        .map_err(|e| eyre!("Failed to read file '{}': {}", source, e))
}
