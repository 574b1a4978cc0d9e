pub fn user_path_segments(username: &str) -> [&str; 2] {
    ["users", username]
}
