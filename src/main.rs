fn main() -> anyhow::Result<()> {
    pool_scene::flow::run()
}
