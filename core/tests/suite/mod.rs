mod browser_flow;
mod support;
