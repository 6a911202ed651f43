use base_request::config::RequestConfig;
use base_request::{BaseRequest, FormData, Headers, RequestError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // First argument is the URL to fetch, second (optional) the timeout in seconds
    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "https://httpbin.org/get".to_string());
    let timeout = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5);

    let cfg = RequestConfig::builder().timeout_seconds(timeout).build()?;
    let req = BaseRequest::with_config(cfg);

    let headers = Headers::from([("Accept".to_string(), "application/json".to_string())]);

    match req.get_response(&url, &headers, false).await {
        Ok(resp) => {
            println!("{} {}", resp.status, resp.url);
            for (name, value) in &resp.headers {
                println!("{name}: {value}");
            }
            for (name, value) in &resp.cookies {
                println!("cookie {name}={value}");
            }
            println!();
            println!("{}", resp.body.as_text().unwrap_or_default());
        }
        Err(e @ RequestError::NoNetworkConnection { .. }) => {
            eprintln!("cannot reach {url}: {e}");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    // Posting a form works the same way
    if url.starts_with("https://httpbin.org") {
        let data = FormData::from([("engine".to_string(), "gosub".to_string())]);
        let body = req.post("https://httpbin.org/post", &headers, &data, true).await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    Ok(())
}
