use pdf_runner::entrypoint::run;
use pdf_runner::layout::Layout;
use pdf_runner::logger::init_logger;
use pdf_runner::processor::PdfInventory;

fn main() {
    init_logger();

    if let Err(e) = run_container() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_container() -> anyhow::Result<()> {
    // Fixed mount points; the binary takes no arguments
    let layout = Layout::container();

    let mut processor = PdfInventory::new();

    run(&layout, &mut processor)
}
