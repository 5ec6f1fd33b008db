fn main() -> anyhow::Result<()> {
    dropgallery_lib::run()
}
