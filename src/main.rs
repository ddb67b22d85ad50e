use apiprof::error::AppResult;

fn main() -> AppResult<()> {
    apiprof::entry::run()
}
