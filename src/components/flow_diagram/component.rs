use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev::KeyboardEvent;
use leptos::html::{Canvas, Input};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::editor::{FlowEditor, FlowEvent};
use super::render::{self, CANVAS_BACKGROUND, Scene};
use super::state::{self, CanvasState, ConnectState, DragState, Gesture, Hit, PanState};
use super::store::{EdgeChange, NodeChange};
use super::types::{NODE_HEIGHT, NODE_WIDTH, NodeId, Position};
use super::viewport::{Viewport, fit_nodes};

const ZOOM_STEP: f64 = 1.2;
const LABEL_FONT_SIZE: f64 = 12.0;

/// Canvas view of a [`FlowEditor`], with drag, pan, zoom, connect, select,
/// delete and inline label editing, plus an optional minimap overlay.
///
/// `canvas_ref` is owned by the caller so it can read the rendered canvas
/// (for export).
#[component]
pub fn FlowDiagram(
	editor: RwSignal<FlowEditor>,
	canvas_ref: NodeRef<Canvas>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = true)] show_controls: bool,
	#[prop(default = true)] show_minimap: bool,
) -> impl IntoView {
	let viewport = RwSignal::new(Viewport::default());
	let state: Rc<RefCell<CanvasState>> = Rc::new(RefCell::new(CanvasState::default()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("flow diagram canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = CanvasState::new(w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			draw_frame(&mut state_anim.borrow_mut(), editor, viewport, show_minimap, &ctx);
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get() {
			let _ = canvas.focus();
		}
		if show_minimap {
			let (w, h) = {
				let s = state_md.borrow();
				(s.width, s.height)
			};
			if render::minimap_frame(w, h).contains(Position::new(x, y)) {
				return;
			}
		}
		let vp = viewport.get_untracked();
		let p = vp.to_diagram(x, y);
		let hit = editor.with_untracked(|e| state::hit_test(e.store(), p));

		let gesture = match hit {
			Some(Hit::Handle { node, kind }) => Gesture::Connect(ConnectState {
				node,
				handle: kind,
				cursor: p,
			}),
			Some(Hit::Node(id)) => {
				select_only(editor, Some(id.as_str()), None);
				let node_start = editor
					.with_untracked(|e| e.store().node(&id).map(|n| n.position))
					.unwrap_or_default();
				Gesture::Drag(DragState {
					node: id,
					start_x: x,
					start_y: y,
					node_start,
				})
			}
			Some(Hit::Edge(id)) => {
				select_only(editor, None, Some(id.as_str()));
				Gesture::None
			}
			None => {
				select_only(editor, None, None);
				Gesture::Pan(PanState {
					start_x: x,
					start_y: y,
					viewport_start: vp,
				})
			}
		};
		state_md.borrow_mut().gesture = gesture;
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		match &mut s.gesture {
			Gesture::Drag(drag) => {
				let k = viewport.get_untracked().zoom;
				let position = Position::new(
					drag.node_start.x + (x - drag.start_x) / k,
					drag.node_start.y + (y - drag.start_y) / k,
				);
				let id = drag.node.clone();
				editor.update(|e| {
					e.dispatch(FlowEvent::NodesChanged(vec![NodeChange::Position {
						id,
						position,
					}]))
				});
			}
			Gesture::Pan(pan) => {
				viewport.set(Viewport {
					x: pan.viewport_start.x + (x - pan.start_x),
					y: pan.viewport_start.y + (y - pan.start_y),
					zoom: pan.viewport_start.zoom,
				});
			}
			Gesture::Connect(connect) => {
				connect.cursor = viewport.get_untracked().to_diagram(x, y);
			}
			Gesture::None => {}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let gesture = std::mem::take(&mut state_mu.borrow_mut().gesture);
		let Gesture::Connect(connect) = gesture else {
			return;
		};
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let p = viewport.get_untracked().to_diagram(x, y);
		let Some((node, kind)) = editor.with_untracked(|e| state::handle_at(e.store(), p)) else {
			return;
		};
		if let Some(connection) = state::connection_between(
			(connect.node.as_str(), connect.handle),
			(node.as_str(), kind),
		) {
			editor.update(|e| e.dispatch(FlowEvent::Connect(connection)));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().gesture = Gesture::None;
	};

	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let p = viewport.get_untracked().to_diagram(x, y);
		if let Some(id) = editor.with_untracked(|e| state::node_at(e.store(), p)) {
			editor.update(|e| e.dispatch(FlowEvent::DoubleClick(id)));
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		viewport.update(|vp| *vp = vp.zoom_at(x, y, factor));
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if !matches!(ev.key().as_str(), "Delete" | "Backspace") {
			return;
		}
		ev.prevent_default();
		editor.update(|e| {
			let (nodes, edges) = e.store().deletion_changes();
			if nodes.is_empty() && edges.is_empty() {
				return;
			}
			log::debug!("deleting {} nodes, {} edges", nodes.len(), edges.len());
			e.dispatch(FlowEvent::EdgesChanged(edges));
			e.dispatch(FlowEvent::NodesChanged(nodes));
		});
	};

	let state_ctl = state.clone();
	let zoom_by = move |factor: f64| {
		let (w, h) = {
			let s = state_ctl.borrow();
			(s.width, s.height)
		};
		viewport.update(|vp| *vp = vp.zoom_at(w / 2.0, h / 2.0, factor));
	};
	let state_fit = state.clone();
	let fit_view = move |_: MouseEvent| {
		let (w, h) = {
			let s = state_fit.borrow();
			(s.width, s.height)
		};
		viewport.set(editor.with_untracked(|e| fit_nodes(e.store().nodes(), w, h)));
	};

	let controls = show_controls.then(|| {
		let zoom_out = zoom_by.clone();
		view! {
			<div class="flow-controls">
				<button title="zoom in" on:click=move |_| zoom_by(ZOOM_STEP)>"+"</button>
				<button title="zoom out" on:click=move |_| zoom_out(1.0 / ZOOM_STEP)>"−"</button>
				<button title="fit view" on:click=fit_view>"⤢"</button>
			</div>
		}
	});

	let editing = Memo::new(move |_| {
		editor.with(|e| e.edit_state().active().map(str::to_owned))
	});

	view! {
		<div class="flow-diagram" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="flow-diagram-canvas"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				on:wheel=on_wheel
				on:keydown=on_keydown
				style="display: block; outline: none; cursor: grab;"
			/>
			{move || editing.get().map(|id| view! { <LabelEditor id editor viewport /> })}
			{controls}
		</div>
	}
}

/// Inline text field laid over the node being edited.
#[component]
fn LabelEditor(id: NodeId, editor: RwSignal<FlowEditor>, viewport: RwSignal<Viewport>) -> impl IntoView {
	let input_ref = NodeRef::<Input>::new();
	Effect::new(move |_| {
		if let Some(input) = input_ref.get() {
			let _ = input.focus();
			input.select();
		}
	});

	let initial = editor
		.with_untracked(|e| e.store().node(&id).map(|n| n.label.clone()))
		.unwrap_or_default();

	let id_style = id.clone();
	let style = move || {
		let vp = viewport.get();
		let position = editor
			.with(|e| e.store().node(&id_style).map(|n| n.position))
			.unwrap_or_default();
		let s = vp.to_screen(position);
		format!(
			"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
			 font-size: {}px; box-sizing: border-box; text-align: center;",
			s.x,
			s.y,
			NODE_WIDTH * vp.zoom,
			NODE_HEIGHT * vp.zoom,
			LABEL_FONT_SIZE * vp.zoom
		)
	};

	let (id_input, id_blur, id_key) = (id.clone(), id.clone(), id);
	view! {
		<input
			node_ref=input_ref
			type="text"
			class="flow-label-editor"
			prop:value=initial
			style=style
			on:input=move |ev| {
				let label = event_target_value(&ev);
				editor.update(|e| e.dispatch(FlowEvent::LabelInput { id: id_input.clone(), label }));
			}
			on:blur=move |_| editor.update(|e| e.dispatch(FlowEvent::Blur(id_blur.clone())))
			on:keydown=move |ev: KeyboardEvent| {
				if ev.key() == "Enter" {
					editor.update(|e| e.dispatch(FlowEvent::Commit(id_key.clone())));
				}
			}
		/>
	}
}

fn draw_frame(
	s: &mut CanvasState,
	editor: RwSignal<FlowEditor>,
	viewport: RwSignal<Viewport>,
	show_minimap: bool,
	ctx: &CanvasRenderingContext2d,
) {
	let generation = editor.with_untracked(FlowEditor::generation);
	if generation != s.fitted_generation {
		s.fitted_generation = generation;
		viewport.set(editor.with_untracked(|e| {
			fit_nodes(e.store().nodes(), s.width, s.height)
		}));
	}

	let vp = viewport.get_untracked();
	editor.with_untracked(|e| {
		let scene = Scene {
			store: e.store(),
			editing: e.edit_state().active(),
			viewport: vp,
			width: s.width,
			height: s.height,
		};
		render::clear(s.width, s.height, CANVAS_BACKGROUND, ctx);
		render::draw_grid(vp, s.width, s.height, ctx);
		render::draw_content(&scene, ctx);

		if let Gesture::Connect(connect) = &s.gesture {
			if let Some(node) = e.store().node(&connect.node) {
				render::draw_pending_connection(
					vp,
					connect.handle.position(node),
					connect.cursor,
					ctx,
				);
			}
		}
		if show_minimap {
			render::draw_minimap(&scene, ctx);
		}
	});
}

fn select_only(editor: RwSignal<FlowEditor>, node: Option<&str>, edge: Option<&str>) {
	editor.update(|e| {
		let (mut nodes, mut edges) = e.store().clear_selection_changes();
		if let Some(id) = node {
			nodes.push(NodeChange::Select {
				id: id.to_owned(),
				selected: true,
			});
		}
		if let Some(id) = edge {
			edges.push(EdgeChange::Select {
				id: id.to_owned(),
				selected: true,
			});
		}
		e.dispatch(FlowEvent::NodesChanged(nodes));
		e.dispatch(FlowEvent::EdgesChanged(edges));
	});
}

fn local_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}
