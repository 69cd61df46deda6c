fn main() {
    urban_runner::game::run();
}
