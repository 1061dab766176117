// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Build information and version utilities for roster-server.

/// Format version info for display.
pub fn format_version_info() -> String {
	format!(
		"roster-server version: {}\n\
         Platform:              {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn version_info_names_the_binary_and_release() {
		let info = format_version_info();
		assert!(info.starts_with("roster-server version: "));
		assert!(info.contains(env!("CARGO_PKG_VERSION")));
		assert!(info.contains("Platform:"));
	}
}
