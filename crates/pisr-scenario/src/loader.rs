//! JSON scenario loading.
//!
//! ```json
//! {
//!   "trade_id": 1000,
//!   "max_visits": 2000,
//!   "max_time_secs": 20000,
//!   "geometry": "clusters",
//!   "vehicles": {
//!     "start_tasks":     [1, 4, 7],
//!     "headings_deg":    [0, 45, 180],
//!     "speeds":          [25, 25, 25],
//!     "bank_angles_deg": [30, 30, 30]
//!   },
//!   "routing": [
//!     { "type": "Manual", "tour": [1, 2, 6, 4, 5, 8, 10, 9, 7, 3], "start_index": 0 },
//!     { "type": "MD2WRP", "beta": 5.0, "weights": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1], "measure": { "type": "Dubins" } },
//!     { "type": "MD2WRP", "beta": 4.0, "weights": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1], "measure": { "type": "Dubins" } }
//!   ],
//!   "pathing":       [{ "type": "Dubins" }, { "type": "Dubins" }, { "type": "Dubins" }],
//!   "communication": [{ "type": "Destination" }, { "type": "Destination" }, { "type": "Destination" }]
//! }
//! ```
//!
//! Loading only decodes the file.  Cross-field checks (vector lengths, task
//! references, tracker requirements) happen in [`Scenario::build`].

use std::io::Read;
use std::path::Path;

use crate::{Scenario, ScenarioError};

/// Load a [`Scenario`] from a JSON file.
pub fn load_scenario_json(path: &Path) -> Result<Scenario, ScenarioError> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    let scenario = load_scenario_reader(std::io::BufReader::new(file))?;
    tracing::info!(path = %path.display(), trade = scenario.trade_id, "scenario file loaded");
    Ok(scenario)
}

/// Like [`load_scenario_json`] but accepts any `Read` source.
pub fn load_scenario_reader<R: Read>(reader: R) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_reader(reader)?)
}
