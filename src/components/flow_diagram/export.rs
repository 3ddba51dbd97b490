//! PNG export of the current diagram.
//!
//! The diagram is redrawn onto an offscreen canvas of a fixed size, fitted to
//! the node bounds, then handed to the browser as a blob download. Nothing
//! here is reported to the user: a missing canvas aborts quietly and DOM
//! failures are only logged.

use log::{debug, info, warn};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{
	Blob, CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, Url,
};

use super::render::{self, Scene};
use super::store::GraphStore;
use super::types::Node;
use super::viewport::{self, FIT_PADDING, MAX_ZOOM, MIN_ZOOM, Viewport};

pub const EXPORT_WIDTH: u32 = 1024;
pub const EXPORT_HEIGHT: u32 = 768;
pub const EXPORT_BACKGROUND: &str = "#1a365d";
pub const EXPORT_FILE_NAME: &str = "reactflow.png";

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("diagram canvas is not attached to a document")]
	NoDocument,
	#[error("2d context unavailable")]
	NoContext,
	#[error("unexpected element type for <{0}>")]
	Element(&'static str),
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for ExportError {
	fn from(value: JsValue) -> Self {
		ExportError::Js(format!("{value:?}"))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
	pub width: u32,
	pub height: u32,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub padding: f64,
	pub background: String,
	pub file_name: String,
}

impl Default for ExportOptions {
	fn default() -> Self {
		Self {
			width: EXPORT_WIDTH,
			height: EXPORT_HEIGHT,
			min_zoom: MIN_ZOOM,
			max_zoom: MAX_ZOOM,
			padding: FIT_PADDING,
			background: EXPORT_BACKGROUND.to_owned(),
			file_name: EXPORT_FILE_NAME.to_owned(),
		}
	}
}

impl ExportOptions {
	/// Transform placing `nodes` inside the export image.
	pub fn viewport(&self, nodes: &[Node]) -> Viewport {
		viewport::viewport_for_bounds(
			viewport::bounds(nodes),
			self.width as f64,
			self.height as f64,
			self.min_zoom,
			self.max_zoom,
			self.padding,
		)
	}
}

/// Start a PNG download of `store` as seen through `target`'s document.
///
/// `target` is the on-screen diagram canvas; when it is not mounted yet the
/// export is skipped. The image is produced asynchronously, so a second call
/// while one is pending simply starts another download.
pub fn export_png(target: Option<&HtmlCanvasElement>, store: &GraphStore, options: &ExportOptions) {
	let Some(target) = target else {
		debug!("export skipped, diagram not mounted");
		return;
	};
	if let Err(err) = request_png(target, store, options) {
		warn!("export failed: {err}");
	}
}

fn request_png(
	target: &HtmlCanvasElement,
	store: &GraphStore,
	options: &ExportOptions,
) -> Result<(), ExportError> {
	let document = target.owner_document().ok_or(ExportError::NoDocument)?;
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| ExportError::Element("canvas"))?;
	canvas.set_width(options.width);
	canvas.set_height(options.height);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(ExportError::NoContext)?
		.dyn_into()
		.map_err(|_| ExportError::NoContext)?;

	let scene = Scene {
		store,
		editing: None,
		viewport: options.viewport(store.nodes()),
		width: options.width as f64,
		height: options.height as f64,
	};
	render::render(&scene, &ctx, &options.background);

	info!(
		"exporting {} nodes to {} ({}x{})",
		store.nodes().len(),
		options.file_name,
		options.width,
		options.height
	);
	let file_name = options.file_name.clone();
	let on_blob = Closure::once_into_js(move |blob: Option<Blob>| {
		let Some(blob) = blob else {
			warn!("export produced no image");
			return;
		};
		if let Err(err) = download(&document, &blob, &file_name) {
			warn!("export download failed: {err}");
		}
	});
	canvas.to_blob(on_blob.unchecked_ref())?;
	Ok(())
}

fn download(document: &Document, blob: &Blob, file_name: &str) -> Result<(), ExportError> {
	let url = Url::create_object_url_with_blob(blob)?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| ExportError::Element("a"))?;
	anchor.set_download(file_name);
	anchor.set_href(&url);
	anchor.click();
	anchor.remove();
	Url::revoke_object_url(&url)?;
	Ok(())
}
