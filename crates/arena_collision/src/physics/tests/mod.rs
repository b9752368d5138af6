//! Tick-level scenarios across the index, engine and registry
