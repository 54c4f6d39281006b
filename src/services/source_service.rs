use crate::error::Result;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

const USER_AGENT: &str = "Mozilla/5.0";

/// Acquires source text from webpages and uploaded PDFs.
#[derive(Clone)]
pub struct SourceService {
    client: Client,
    fetch_timeout: Duration,
}

impl SourceService {
    pub fn new(client: Client, fetch_timeout: Duration) -> Self {
        Self {
            client,
            fetch_timeout,
        }
    }

    pub async fn fetch_webpage_text(&self, raw_url: &str) -> Result<String> {
        let url = parse_http_url(raw_url)?;
        tracing::info!(url = %url, "Fetching webpage");

        let html = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.fetch_timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let text = paragraph_text(&html);
        if text.trim().is_empty() {
            return Err(anyhow::anyhow!("No readable text found.").into());
        }
        Ok(text)
    }

    pub async fn extract_pdf_text(&self, bytes: bytes::Bytes) -> Result<String> {
        if !bytes.starts_with(b"%PDF") {
            return Err(anyhow::anyhow!("Uploaded file is not a PDF.").into());
        }

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| anyhow::anyhow!("PDF extraction task failed: {}", e))?
            .map_err(|e| anyhow::anyhow!("Could not read PDF: {}", e))?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(anyhow::anyhow!("No readable text found in PDF.").into());
        }
        Ok(text)
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| anyhow::anyhow!("Invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow::anyhow!("Unsupported URL scheme: {}", other).into()),
    }
}

/// Space-joined text of every `<p>` element.
fn paragraph_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{response::Html as HtmlResponse, routing::get, Router};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service() -> SourceService {
        SourceService::new(Client::new(), Duration::from_secs(5))
    }

    #[test]
    fn joins_paragraph_text_only() {
        let html = "<html><head><title>T</title></head><body>\
                    <nav>Menu</nav><p>First <b>bold</b> part.</p><div>skip</div><p>Second.</p>\
                    </body></html>";
        assert_eq!(paragraph_text(html), "First bold part. Second.");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(parse_http_url("ftp://example.com/file").is_err());
        assert!(parse_http_url("not a url").is_err());
        assert!(parse_http_url(" https://example.com/page ").is_ok());
    }

    #[tokio::test]
    async fn fetches_paragraphs_from_page() {
        let base = serve(Router::new().route(
            "/article",
            get(|| async { HtmlResponse("<p>Rust is a systems language.</p><p>It has traits.</p>") }),
        ))
        .await;
        let text = service()
            .fetch_webpage_text(&format!("{}/article", base))
            .await
            .unwrap();
        assert_eq!(text, "Rust is a systems language. It has traits.");
    }

    #[tokio::test]
    async fn page_without_paragraphs_is_an_error() {
        let base = serve(Router::new().route(
            "/empty",
            get(|| async { HtmlResponse("<div>nothing here</div>") }),
        ))
        .await;
        let err = service()
            .fetch_webpage_text(&format!("{}/empty", base))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No readable text"));
    }

    #[tokio::test]
    async fn missing_page_is_an_error() {
        let base = serve(Router::new()).await;
        assert!(service()
            .fetch_webpage_text(&format!("{}/missing", base))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn extracts_text_from_pdf() {
        let pdf = bytes::Bytes::from_static(include_bytes!("../../tests/fixtures/cell_notes.pdf"));
        let text = service().extract_pdf_text(pdf).await.unwrap();
        assert!(text.contains("powerhouse of the cell"));
        assert!(text.contains("genetic code"));
    }

    #[tokio::test]
    async fn pdf_without_text_is_an_error() {
        let pdf = bytes::Bytes::from_static(include_bytes!("../../tests/fixtures/blank_page.pdf"));
        assert!(service().extract_pdf_text(pdf).await.is_err());
    }

    #[tokio::test]
    async fn non_pdf_bytes_are_rejected() {
        let err = service()
            .extract_pdf_text(bytes::Bytes::from_static(b"GIF89a"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }
}
