use crate::export::SnapshotExporter;
use crate::server::assets::{self, Asset};
use crate::server::{MapEndpoint, ServeError};
use crate::store::AggregateStore;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode, header};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::borrow::Cow;
use std::sync::Arc;

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// Terminal gateway for the map: answers every request itself.
pub struct MapGateway {
    exporter: SnapshotExporter,
    index: Bytes,
}

impl MapGateway {
    /// Renders the index page once, up front.
    pub fn new(store: Arc<AggregateStore>, title: Option<&str>) -> Result<Self, ServeError> {
        let index = assets::render_index(title).ok_or(ServeError::MissingAsset {
            name: "index.html",
        })?;

        Ok(Self {
            exporter: SnapshotExporter::new(store),
            index: Bytes::from(index),
        })
    }

    async fn handle_get(&self, session: &mut Session, path: &str, head: bool) -> pingora::Result<()> {
        match path.parse::<MapEndpoint>() {
            Ok(MapEndpoint::Index) => {
                self.send_response(session, StatusCode::OK, HTML, self.index.clone(), head)
                    .await
            }

            Ok(MapEndpoint::Data) => match self.exporter.export_json() {
                Ok(body) => {
                    self.send_response(session, StatusCode::OK, JSON, body.into(), head)
                        .await
                }
                Err(e) => {
                    tracing::warn!(error = %e, "snapshot serialization failed");
                    let body = Bytes::from_static(b"snapshot serialization failed");
                    self.send_response(session, StatusCode::INTERNAL_SERVER_ERROR, TEXT, body, head)
                        .await
                }
            },

            Ok(MapEndpoint::Resource(name)) => match assets::resource(&name) {
                Some(Asset { content_type, data }) => {
                    self.send_response(session, StatusCode::OK, &content_type, into_bytes(data), head)
                        .await
                }
                None => self.send_not_found(session, head).await,
            },

            Err(_) => self.send_not_found(session, head).await,
        }
    }

    async fn send_not_found(&self, session: &mut Session, head: bool) -> pingora::Result<()> {
        let body = Bytes::from_static(b"404 page not found");
        self.send_response(session, StatusCode::NOT_FOUND, TEXT, body, head)
            .await
    }

    async fn send_response(
        &self,
        session: &mut Session,
        status: StatusCode,
        content_type: &str,
        body: Bytes,
        head: bool,
    ) -> pingora::Result<()> {
        let mut resp = ResponseHeader::build(status, None)?;
        resp.insert_header(header::CONTENT_TYPE, content_type)?;
        resp.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

        if head {
            session.write_response_header(Box::new(resp), true).await?;
            return Ok(());
        }

        session.write_response_header(Box::new(resp), false).await?;
        session.write_response_body(Some(body), true).await?;

        Ok(())
    }
}

#[async_trait]
impl ProxyHttp for MapGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        // request_filter always answers.
        Err(Error::new(Custom(
            "MapGateway attempted to proxy upstream (bug)",
        )))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let method = session.req_header().method.clone();
        let path = session.req_header().uri.path().to_owned();
        tracing::debug!(%method, path = %path, "request");

        if method != Method::GET && method != Method::HEAD {
            let mut resp = ResponseHeader::build(StatusCode::METHOD_NOT_ALLOWED, None)?;
            resp.insert_header(header::ALLOW, "GET, HEAD")?;
            resp.insert_header(header::CONTENT_LENGTH, "0")?;
            session.write_response_header(Box::new(resp), true).await?;
            return Ok(true);
        }

        if let Err(e) = self
            .handle_get(session, &path, method == Method::HEAD)
            .await
        {
            tracing::warn!(error = %e, path = %path, "failed to write response");
            return Err(e);
        }

        Ok(true)
    }
}

fn into_bytes(data: Cow<'static, [u8]>) -> Bytes {
    match data {
        Cow::Borrowed(slice) => Bytes::from_static(slice),
        Cow::Owned(vec) => Bytes::from(vec),
    }
}
