use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::protocol::{
    BestMoveRequest, BestMoveResponse, CreateGameRequest, ErrorResponse, GameSnapshot, MoveRequest,
};
use crate::service::GameService;

/// The calls the client makes against the game service.
pub trait GameApi {
    fn create_game(&self, req: &CreateGameRequest) -> Result<GameSnapshot, ClientError>;

    fn make_move(&self, id: u64, req: &MoveRequest) -> Result<GameSnapshot, ClientError>;

    fn best_move(&self, id: u64, req: &BestMoveRequest) -> Result<BestMoveResponse, ClientError>;
}

/// Talks to a remote game service over HTTP.
pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    /// `base_url` is the games collection, e.g. `http://host/api/algorithms/`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(HttpGameApi { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn action_url(&self, id: u64, action: &str) -> String {
        format!("{}{}/{}/", self.base_url, id, action)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json()?);
        }

        let message = response
            .json::<ErrorResponse>()
            .map(|body| body.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl GameApi for HttpGameApi {
    fn create_game(&self, req: &CreateGameRequest) -> Result<GameSnapshot, ClientError> {
        log::debug!("POST {}", self.base_url);
        let response = self.client.post(&self.base_url).json(req).send()?;
        Self::decode(response)
    }

    fn make_move(&self, id: u64, req: &MoveRequest) -> Result<GameSnapshot, ClientError> {
        let url = self.action_url(id, "make_move");
        log::debug!("POST {url} column={:?}", req.column);
        let response = self.client.post(url).json(req).send()?;
        Self::decode(response)
    }

    fn best_move(&self, id: u64, req: &BestMoveRequest) -> Result<BestMoveResponse, ClientError> {
        let url = self.action_url(id, "get_best_move");
        log::debug!("POST {url}");
        let response = self.client.post(url).json(req).send()?;
        Self::decode(response)
    }
}

/// Runs the game service in-process, for playing without a server.
#[derive(Clone)]
pub struct LocalGameApi {
    service: Arc<GameService>,
}

impl LocalGameApi {
    pub fn new(service: Arc<GameService>) -> Self {
        LocalGameApi { service }
    }
}

impl GameApi for LocalGameApi {
    fn create_game(&self, req: &CreateGameRequest) -> Result<GameSnapshot, ClientError> {
        Ok(self.service.create_game(req.clone())?)
    }

    fn make_move(&self, id: u64, req: &MoveRequest) -> Result<GameSnapshot, ClientError> {
        Ok(self.service.make_move(id, req.clone())?)
    }

    fn best_move(&self, id: u64, req: &BestMoveRequest) -> Result<BestMoveResponse, ClientError> {
        Ok(self.service.best_move(id, req.clone())?)
    }
}
