//! PNL MCP Server Implementation
//!
//! Exposes the food ledger and the tracking session as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::FoodDraft;
use crate::store::SqliteFoodStore;
use crate::tools::foods;
use crate::tools::status::StatusTracker;
use crate::tools::tracking::{self, SessionSlot};

/// PNL MCP Service
#[derive(Clone)]
pub struct PnlService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: SqliteFoodStore,
    calorie_tolerance: f64,
    tool_router: ToolRouter<PnlService>,
    /// At most one tracking session per server
    session: Arc<std::sync::Mutex<SessionSlot<SqliteFoodStore>>>,
}

impl PnlService {
    pub fn new(database_path: PathBuf, store: SqliteFoodStore, calorie_tolerance: f64) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            store,
            calorie_tolerance,
            tool_router: Self::tool_router(),
            session: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    fn session(&self) -> Result<std::sync::MutexGuard<'_, SessionSlot<SqliteFoodStore>>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Tracking session lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodParams {
    /// Food name; stored lower-cased with the first letter capitalized
    pub name: String,
    /// Grams of protein
    pub protein: f64,
    /// Grams of carbohydrate, fiber included
    pub carbohydrate: f64,
    /// Grams of fat
    pub fat: f64,
    /// Grams of fiber (default 0)
    #[serde(default)]
    pub fiber: f64,
    /// Calories (kcal). Omit to derive them from the macros.
    pub calories: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodNameParams {
    /// Food name (case-insensitive)
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterFoodParams {
    /// Grams of protein
    pub protein: f64,
    /// Grams of carbohydrate, fiber included
    pub carbohydrate: f64,
    /// Grams of fat
    pub fat: f64,
    /// Grams of fiber (default 0)
    #[serde(default)]
    pub fiber: f64,
    /// Calories (kcal). Omit to derive them from the macros.
    pub calories: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PnlService {
    // --- Status ---

    #[tool(description = "Get the current status of the PNL service including build info, database status, and process information")]
    async fn pnl_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(&self.store))
    }

    #[tool(description = "Get step-by-step instructions for recording foods and tracking a day. Call this when starting a tracking session or when unsure how to use the tools.")]
    fn tracking_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TRACKING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TRACKING_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "Save a new food with its macro-nutrients. Existing foods are never overwritten; a duplicate name is reported and discarded.")]
    fn add_food(&self, Parameters(p): Parameters<AddFoodParams>) -> Result<CallToolResult, McpError> {
        let draft = FoodDraft {
            name: p.name, calories: p.calories, protein: p.protein,
            carbohydrate: p.carbohydrate, fat: p.fat, fiber: p.fiber,
        };
        let result = foods::add_food(&self.store, draft, self.calorie_tolerance).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(saved) => json_result(&saved),
            Err(conflict) => json_result(&conflict),
        }
    }

    #[tool(description = "Get a food's calories and macro-nutrients by name")]
    fn get_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::get_food(&self.store, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(food) => json_result(&food),
            None => json_result(&serde_json::json!({ "error": "Food not found", "name": p.name })),
        }
    }

    #[tool(description = "List every stored food alphabetically")]
    fn list_foods(&self) -> Result<CallToolResult, McpError> {
        let result = foods::list_foods(&self.store).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a food by name")]
    fn delete_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::delete_food(&self.store, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(deleted) => json_result(&deleted),
            Err(missing) => json_result(&missing),
        }
    }

    // --- Tracking ---

    #[tool(description = "Start a tracking session for the day's consumption. Returns the current session if one is already active.")]
    fn start_tracking(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session()?;
        let result = tracking::start_tracking(&mut *slot, self.store.clone(), self.calorie_tolerance);
        json_result(&result)
    }

    #[tool(description = "Record one consumed food by name. An unknown food must then be registered (register_food) or skipped (skip_food).")]
    fn consume_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let mut slot = self.session()?;
        let result = tracking::consume_food(&mut *slot, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save the pending unknown food with its macro-nutrients and count it as consumed")]
    fn register_food(&self, Parameters(p): Parameters<RegisterFoodParams>) -> Result<CallToolResult, McpError> {
        let draft = FoodDraft {
            name: String::new(), calories: p.calories, protein: p.protein,
            carbohydrate: p.carbohydrate, fat: p.fat, fiber: p.fiber,
        };
        let mut slot = self.session()?;
        let result = tracking::register_food(&mut *slot, draft).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Drop the pending unknown food without saving or counting it")]
    fn skip_food(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session()?;
        let result = tracking::skip_food(&mut *slot).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "End the tracking session and get the report: foods with counts, macro totals, and percentage of calories per macro")]
    fn finish_tracking(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session()?;
        let result = tracking::finish_tracking(&mut *slot).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PnlService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pnl".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Personal Nutrition Ledger".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Personal Nutrition Ledger (PNL) - food macro records and daily macro tallies. \
                 IMPORTANT: Call tracking_instructions before the first tracking session. \
                 Foods: add_food/get_food/list_foods/delete_food. \
                 Tracking: start_tracking, consume_food (then register_food or skip_food for unknown foods), finish_tracking. \
                 Status: pnl_status."
                    .into(),
            ),
        }
    }
}
