fn main() {
    scoreboard_lib::run()
}
