// Course loading (RON). Read from disk natively, embedded at compile time on web.
use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

use crate::sim::config::CourseConfig;

pub const COURSE_PATH: &str = "assets/course.ron";

/// Load the course definition, falling back to built-in defaults on any error.
pub fn load_course_config() -> CourseConfig {
    #[cfg(target_arch = "wasm32")]
    {
        // No filesystem access in the browser.
        let data = include_str!("../../assets/course.ron");
        return parse_or_default(data, "embedded course");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match fs::read_to_string(COURSE_PATH) {
            Ok(data) => parse_or_default(&data, COURSE_PATH),
            Err(e) => {
                error!("Failed to read course file {COURSE_PATH}: {e}; using defaults");
                CourseConfig::default()
            }
        }
    }
}

fn parse_or_default(data: &str, source: &str) -> CourseConfig {
    match CourseConfig::from_ron(data) {
        Ok(cfg) => {
            info!("Loaded {source}: {} targets, end_z={}", cfg.targets.len(), cfg.end_z);
            cfg
        }
        Err(e) => {
            error!("Failed to parse {source}: {e}; using defaults");
            CourseConfig::default()
        }
    }
}
