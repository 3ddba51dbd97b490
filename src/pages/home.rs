use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::flow_diagram::parser::DEFAULT_FLOW_TEXT;
use crate::components::flow_diagram::{
	ExportOptions, FlowDiagram, FlowEditor, FlowEvent, export_png,
};

/// Flow editor page: text field, generate and export buttons, and the diagram.
#[component]
pub fn Home() -> impl IntoView {
	let editor = RwSignal::new(FlowEditor::default());
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let export_options = ExportOptions::default();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		editor.update(|e| e.dispatch(FlowEvent::Submit));
	};

	let on_export = move |_| {
		let target = canvas_ref.get();
		editor.with_untracked(|e| export_png(target.as_ref(), e.store(), &export_options));
	};

	let placeholder = format!("输入流程文本，例如：{DEFAULT_FLOW_TEXT}");

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="app-container">
				<div class="input-section">
					<form on:submit=on_submit>
						<input
							type="text"
							class="text-input"
							placeholder=placeholder
							prop:value=move || editor.with(|e| e.input_text().to_owned())
							on:input=move |ev| {
								let text = event_target_value(&ev);
								editor.update(|e| e.dispatch(FlowEvent::InputChanged(text)));
							}
						/>
						<button type="submit" class="submit-button">
							"生成流程图"
						</button>
						<button type="button" class="export-button" on:click=on_export>
							"导出PNG"
						</button>
					</form>
				</div>
				<div class="flow-container">
					<FlowDiagram editor canvas_ref />
				</div>
			</div>
		</ErrorBoundary>
	}
}
