use serde::{Deserialize, Serialize};

/// What the user picked from the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    None,
    Draw,
    Edit,
    Erase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolState {
    /// Clicking features just inspects them
    Idle,
    DrawingNewPolygon,
    /// Every line drawn is a cut against the existing areas
    EditingCut,
    /// Every feature selected is deleted
    Erasing,
}

/// What the drawing surface should be accepting from the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    NewPolygon,
    NewLine,
    SelectOnly,
}

impl ToolState {
    pub fn for_tool(tool: Tool) -> ToolState {
        match tool {
            Tool::None => ToolState::Idle,
            Tool::Draw => ToolState::DrawingNewPolygon,
            Tool::Edit => ToolState::EditingCut,
            Tool::Erase => ToolState::Erasing,
        }
    }

    pub fn draw_mode(self) -> DrawMode {
        match self {
            ToolState::DrawingNewPolygon => DrawMode::NewPolygon,
            ToolState::EditingCut => DrawMode::NewLine,
            ToolState::Idle | ToolState::Erasing => DrawMode::SelectOnly,
        }
    }
}
