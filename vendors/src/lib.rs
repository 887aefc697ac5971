//! HTTP client implementations for http-bench
//!
//! This crate provides implementations of the core `HttpClient` trait:
//!
//! - `ReqwestClient`: pooled reqwest client with optional timeout and
//!   redirect following

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod http;

pub use http::{classify_error, ClientError, HttpConfig, ReqwestClient};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use http_bench_core::{AggregationMode, BenchmarkConfig, OrchestratorBuilder};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal server answering every request with the given status line
    async fn spawn_status_server(status: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let mut seen = Vec::new();
                    while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => seen.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_benchmark_against_live_server() {
        let url = spawn_status_server("200 OK").await;
        let config = BenchmarkConfig::new(&url, 10, 2).unwrap();
        let client = Arc::new(ReqwestClient::for_benchmark(&config).unwrap());

        let report = OrchestratorBuilder::new()
            .config(config)
            .client(client)
            .build()
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_requests, 10);
        assert_eq!(report.successful_requests, 10);
        assert_eq!(report.status_distribution.get(&200), Some(&10));
        assert_eq!(report.transport_errors, 0);
    }

    #[tokio::test]
    async fn test_benchmark_against_unreachable_target() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let config = BenchmarkConfig::new(&url, 5, 1).unwrap();
        let client = Arc::new(ReqwestClient::for_benchmark(&config).unwrap());

        let report = OrchestratorBuilder::new()
            .config(config)
            .client(client)
            .aggregation(AggregationMode::Channel)
            .build()
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.transport_errors, 5);
        assert_eq!(report.successful_requests, 0);
        assert!(report.status_distribution.is_empty());
    }

    #[tokio::test]
    async fn test_benchmark_error_statuses_are_counted() {
        let url = spawn_status_server("503 Service Unavailable").await;
        let config = BenchmarkConfig::new(&url, 6, 3).unwrap();
        let client = Arc::new(ReqwestClient::for_benchmark(&config).unwrap());

        let report = OrchestratorBuilder::new()
            .config(config)
            .client(client)
            .build()
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.successful_requests, 0);
        assert_eq!(report.transport_errors, 0);
        assert_eq!(report.other_statuses().collect::<Vec<_>>(), vec![(503, 6)]);
    }
}
