pub mod app;

#[cfg(test)]
mod tests;
