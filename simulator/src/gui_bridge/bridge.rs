use crate::gui_bridge::model::{ActionRequest, ClickRequest, ResizeRequest, VisualizationModel};
use crate::workflow::runner::Session;
use anyhow::{Context, Result};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tacmapcore::math::Point;
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub type SharedSession = Arc<RwLock<Session>>;
type SharedModel = Arc<RwLock<VisualizationModel>>;

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

fn store(state: &SharedModel, model: VisualizationModel) {
    *state.write().unwrap_or_else(PoisonError::into_inner) = model;
}

async fn handle_click(
    request: ClickRequest,
    session: SharedSession,
    state: SharedModel,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut guard = session.write().unwrap_or_else(PoisonError::into_inner);
    let outcome = guard.click(Point::new(request.x, request.y));
    store(&state, guard.model());
    Ok(warp::reply::json(&outcome))
}

async fn handle_action(
    request: ActionRequest,
    session: SharedSession,
    state: SharedModel,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut guard = session.write().unwrap_or_else(PoisonError::into_inner);
    let reply = match guard.apply_action(&request.action, request.value) {
        Ok(()) => {
            store(&state, guard.model());
            warp::reply::with_status(
                warp::reply::json(&json!({"status": "ok"})),
                StatusCode::OK,
            )
        }
        Err(err) => {
            log::warn!("rejected action {}: {err:#}", request.action);
            warp::reply::with_status(
                warp::reply::json(&json!({"status": "error", "message": format!("{err:#}")})),
                StatusCode::BAD_REQUEST,
            )
        }
    };
    Ok(reply)
}

async fn handle_resize(
    request: ResizeRequest,
    session: SharedSession,
    state: SharedModel,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut guard = session.write().unwrap_or_else(PoisonError::into_inner);
    guard.resize(request.width, request.height);
    store(&state, guard.model());
    Ok(warp::reply::json(&json!({"status": "ok"})))
}

/// HTTP endpoint the visualizer polls for scenes and posts input to.
pub struct GuiBridge {
    session: SharedSession,
    state: SharedModel,
}

impl GuiBridge {
    pub fn new(session: SharedSession) -> Self {
        let model = session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .model();
        Self {
            session,
            state: Arc::new(RwLock::new(model)),
        }
    }

    fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
    {
        let state = self.state.clone();
        let session = self.session.clone();
        let state_filter = warp::any().map(move || state.clone());
        let session_filter = warp::any().map(move || session.clone());

        let payload_route = warp::path("payload")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                warp::reply::json(&*state.read().unwrap_or_else(PoisonError::into_inner))
            });

        let click_route = warp::path("click")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter.clone())
            .and(state_filter.clone())
            .and_then(handle_click);

        let action_route = warp::path("action")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter.clone())
            .and(state_filter.clone())
            .and_then(handle_action);

        let resize_route = warp::path("resize")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter)
            .and(state_filter)
            .and_then(handle_resize);

        payload_route
            .or(click_route)
            .or(action_route)
            .or(resize_route)
    }

    /// Serves the routes on a background thread with its own runtime.
    pub fn serve(&self) -> Result<()> {
        let routes = self.routes();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building bridge runtime")?;
        thread::Builder::new()
            .name("gui-bridge".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    warp::serve(routes).run(gui_bind_address()).await;
                });
            })
            .context("spawning bridge thread")?;
        log::info!("bridge listening on http://{}", gui_bind_address());
        Ok(())
    }

    /// Rebuilds the published model from the session.
    pub fn publish(&self) {
        let model = self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .model();
        log::debug!(
            "publishing tick {} with {} draw commands, {} designations",
            model.tick,
            model.scene.commands().len(),
            model.designations.len()
        );
        store(&self.state, model);
    }

    pub fn publish_status(&self, message: &str) {
        log::info!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}
