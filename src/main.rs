/// Binary entrypoint for the `browser-copy-url` executable.
///
/// Keeps the binary thin — all logic lives in the `copy_url_lib` crate so
/// tests can import library functions directly.
fn main() -> anyhow::Result<()> {
    copy_url_lib::run()
}
