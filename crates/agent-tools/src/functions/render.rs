//! Render-function catalog.
//!
//! These schemas tell the model which UI components it can ask for. The
//! orchestrator never executes them: a render call ends the turn and its
//! arguments go to the UI layer as-is. `render_response` and
//! `render_flexbox` are composites whose arguments embed further render
//! calls; expanding those is also the UI layer's job.

use brain_core::{FunctionSpec, UnclassifiedName};
use serde_json::{json, Value};

const COLOR_THEMES: [&str; 8] = [
    "default",
    "primary",
    "secondary",
    "accent",
    "error",
    "info",
    "success",
    "warning",
];

const LEAF_COMPONENTS: [&str; 5] = [
    "render_buttons",
    "render_chat_bubble",
    "render_form",
    "render_table",
    "render_weather",
];

/// Every built-in render function, in prompt order.
pub fn render_specs() -> Result<Vec<FunctionSpec>, UnclassifiedName> {
    Ok(vec![
        buttons()?,
        chat_bubble()?,
        form()?,
        response()?,
        table()?,
        weather()?,
        flexbox()?,
    ])
}

fn child_component(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "name": {
                "type": "string",
                "enum": LEAF_COMPONENTS,
                "description": "Name of the render function"
            },
            "arguments": {
                "type": "string",
                "description": "JSON-encoded arguments for the function"
            }
        },
        "required": ["name", "arguments"]
    })
}

fn buttons() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_buttons",
        "Display a row of interactive buttons; useful for the user's choice from multiple options",
        json!({
            "type": "object",
            "properties": {
                "elements": {
                    "type": "array",
                    "description": "Button(s) to render, with descriptive ID, label, value, and color",
                    "items": {
                        "type": "object",
                        "description": "A button to render",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Identifier per button; maps to the return value when clicked"
                            },
                            "label": {
                                "type": "string",
                                "description": "Display text on the button"
                            },
                            "value": {
                                "type": "string",
                                "description": "Return value when the button is clicked"
                            },
                            "colorTheme": {
                                "type": "string",
                                "enum": COLOR_THEMES,
                                "description": "Theme color of the button"
                            }
                        },
                        "required": ["id", "label", "value", "colorTheme"]
                    }
                }
            },
            "required": ["elements"]
        }),
    )
}

fn chat_bubble() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_chat_bubble",
        "Show a text message for non-interactive information, instructions, or responses",
        json!({
            "type": "object",
            "properties": {
                "value": {
                    "type": "string",
                    "description": "Content of the text message"
                }
            },
            "required": ["value"]
        }),
    )
}

fn form() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_form",
        "Create a form for systematic collection of complex user data",
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Descriptive identifier of the form"
                },
                "elements": {
                    "type": "array",
                    "description": "Form elements with descriptive IDs",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "description": "Identifier for this form element"},
                            "label": {"type": "string", "description": "Displayed label for this form element"},
                            "type": {
                                "type": "string",
                                "enum": ["checkboxes", "input", "radio", "select", "textarea"],
                                "description": "Type of the form element"
                            },
                            "options": {
                                "type": "array",
                                "description": "(Optional) Options for select, radio or checkboxes elements",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "label": {"type": "string", "description": "Displayed label for the option"},
                                        "value": {"type": "string", "description": "Return value if this option is selected"}
                                    },
                                    "required": ["label", "value"]
                                }
                            }
                        },
                        "required": ["id", "label", "type"]
                    }
                },
                "submitLabel": {
                    "type": "string",
                    "description": "Form's submit button text"
                }
            },
            "required": ["elements"]
        }),
    )
}

fn response() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_response",
        "Bundle multiple response components into a columnar format for user-friendly viewing",
        json!({
            "type": "object",
            "properties": {
                "elements": {
                    "type": "array",
                    "description": "Response components, rendered top to bottom",
                    "items": child_component("A component to render")
                }
            },
            "required": ["elements"]
        }),
    )
}

fn table() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_table",
        "Generate a table for displaying structured data in rows and columns",
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "description": "Descriptive identifier for the table"},
                "headers": {
                    "type": "array",
                    "description": "Column headers",
                    "items": {"type": "string"}
                },
                "rows": {
                    "type": "array",
                    "description": "Table data",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "description": "Identifier for this row"},
                            "columns": {
                                "type": "array",
                                "description": "Column data for each header in this row",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "id": {"type": "string", "description": "Identifier for this cell"},
                                        "header": {"type": "string", "description": "Header this value belongs to"},
                                        "value": {"type": "string", "description": "Display value"}
                                    },
                                    "required": ["header", "value"]
                                }
                            },
                            "detailsButton": {
                                "type": "object",
                                "description": "(Optional) Details button for this row",
                                "properties": {
                                    "id": {"type": "string"},
                                    "label": {"type": "string"},
                                    "value": {"type": "string", "description": "Return value when clicked"}
                                }
                            }
                        },
                        "required": ["id", "columns"]
                    }
                }
            },
            "required": ["headers", "rows"]
        }),
    )
}

fn weather() -> Result<FunctionSpec, UnclassifiedName> {
    let format = json!({
        "type": "string",
        "enum": ["celsius", "fahrenheit"],
        "description": "The temperature unit"
    });

    FunctionSpec::new(
        "render_weather",
        "Show rather than tell: render current weather, a multi-day forecast and precipitation",
        json!({
            "type": "object",
            "properties": {
                "location": {"type": "string", "description": "The city and state, e.g. San Francisco, CA"},
                "current": {
                    "type": "object",
                    "properties": {
                        "temperature": {"type": "string", "description": "The current temperature"},
                        "format": format,
                        "forecast": {"type": "string", "description": "The forecast for the rest of the day"}
                    }
                },
                "forecast": {
                    "type": "array",
                    "description": "The forecast for the next days",
                    "items": {
                        "type": "object",
                        "properties": {
                            "date": {"type": "string"},
                            "temperature": {"type": "string"},
                            "format": format,
                            "forecast": {"type": "string"}
                        }
                    }
                },
                "precipitation": {
                    "type": "array",
                    "description": "Precipitation percentages for the next 24 hours",
                    "items": {
                        "type": "object",
                        "properties": {
                            "time": {"type": "string"},
                            "percentage": {"type": "number"}
                        }
                    }
                }
            },
            "required": ["location", "current"]
        }),
    )
}

fn flexbox() -> Result<FunctionSpec, UnclassifiedName> {
    FunctionSpec::new(
        "render_flexbox",
        "Lay out several components in a row or column",
        json!({
            "type": "object",
            "properties": {
                "children": {
                    "type": "array",
                    "description": "Components to lay out",
                    "items": child_component("A child component")
                },
                "flexDirection": {"type": "string", "enum": ["flex-row", "flex-col"]},
                "alignItems": {"type": "string", "enum": ["items-start", "items-center", "items-end"]},
                "justifyContent": {"type": "string", "enum": ["justify-start", "justify-center", "justify-end", "justify-between"]}
            },
            "required": ["children"]
        }),
    )
}
