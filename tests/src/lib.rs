#[cfg(test)]
mod pipeline;
