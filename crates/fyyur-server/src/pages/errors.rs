pub fn not_found() -> String {
    r#"<h1>404</h1><p>Not found</p><p><a href="/">Back home</a></p>"#.to_string()
}

pub fn server_error() -> String {
    r#"<h1>500</h1><p>Something went wrong on our end</p><p><a href="/">Back home</a></p>"#
        .to_string()
}
