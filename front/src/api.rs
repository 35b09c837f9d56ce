use reqwest::{Response, StatusCode};
use tally_api::v1::{CreateTodo, Health, Message, Todo, TodoId, UpdateTodo};

/// HTTP client for the todo API.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> eyre::Result<Health> {
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn get_todos(&self) -> eyre::Result<Vec<Todo>> {
        let response = self.http.get(self.url("/api/todos")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn add_todo(&self, body: &CreateTodo) -> eyre::Result<Todo> {
        let response = (self.http.post(self.url("/api/todos")))
            .json(body)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn update_todo(&self, id: TodoId, body: &UpdateTodo) -> eyre::Result<Todo> {
        let response = (self.http.put(self.url(&format!("/api/todos/{}", id))))
            .json(body)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn delete_todo(&self, id: TodoId) -> eyre::Result<()> {
        let response = (self.http.delete(self.url(&format!("/api/todos/{}", id))))
            .send()
            .await?;

        check(response).await?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns an error status into an error carrying the server's message.
async fn check(response: Response) -> eyre::Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<Message>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned(),
    };

    match status {
        StatusCode::NOT_FOUND => eyre::bail!("todo not found: {}", message),
        _ => eyre::bail!("request failed with {}: {}", status, message),
    }
}
