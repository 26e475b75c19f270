//! Interface segregation: clients should not be forced to depend on methods
//! they do not use.

use thiserror::Error;

use crate::console;
use crate::error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("operation not supported by this device: {0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// =============================================================================
// Before: one fat trait
// =============================================================================

pub trait Machine {
    fn print(&self, doc: &Document) -> Result<String, DeviceError>;
    fn scan(&self, doc: &Document) -> Result<String, DeviceError>;
    fn fax(&self, doc: &Document) -> Result<String, DeviceError>;
}

pub struct MultiFunctionPrinter;

impl Machine for MultiFunctionPrinter {
    fn print(&self, doc: &Document) -> Result<String, DeviceError> {
        Ok(format!("Printing: {}", doc.name))
    }

    fn scan(&self, doc: &Document) -> Result<String, DeviceError> {
        Ok(format!("Scanning: {}", doc.name))
    }

    fn fax(&self, doc: &Document) -> Result<String, DeviceError> {
        Ok(format!("Faxing: {}", doc.name))
    }
}

/// Can only print, yet `Machine` makes it answer for scan and fax too.
pub struct OldFashionedPrinter;

impl Machine for OldFashionedPrinter {
    fn print(&self, doc: &Document) -> Result<String, DeviceError> {
        Ok(format!("Printing: {}", doc.name))
    }

    fn scan(&self, _doc: &Document) -> Result<String, DeviceError> {
        Err(DeviceError::Unsupported("scan"))
    }

    fn fax(&self, _doc: &Document) -> Result<String, DeviceError> {
        Err(DeviceError::Unsupported("fax"))
    }
}

// =============================================================================
// After: one trait per capability
// =============================================================================

pub trait Printer {
    fn print(&self, doc: &Document) -> String;
}

pub trait Scanner {
    fn scan(&self, doc: &Document) -> String;
}

pub trait Fax {
    fn fax(&self, doc: &Document) -> String;
}

pub struct SimplePrinter;

impl Printer for SimplePrinter {
    fn print(&self, doc: &Document) -> String {
        format!("Printing: {}", doc.name)
    }
}

pub struct SimpleScanner;

impl Scanner for SimpleScanner {
    fn scan(&self, doc: &Document) -> String {
        format!("Scanning: {}", doc.name)
    }
}

pub struct SimpleFax;

impl Fax for SimpleFax {
    fn fax(&self, doc: &Document) -> String {
        format!("Faxing: {}", doc.name)
    }
}

/// Delegates each capability to a dedicated device.
pub struct MultiFunctionDevice<P, S, F> {
    printer: P,
    scanner: S,
    fax: F,
}

impl<P: Printer, S: Scanner, F: Fax> MultiFunctionDevice<P, S, F> {
    pub fn new(printer: P, scanner: S, fax: F) -> Self {
        Self { printer, scanner, fax }
    }
}

impl<P: Printer, S, F> Printer for MultiFunctionDevice<P, S, F> {
    fn print(&self, doc: &Document) -> String {
        self.printer.print(doc)
    }
}

impl<P, S: Scanner, F> Scanner for MultiFunctionDevice<P, S, F> {
    fn scan(&self, doc: &Document) -> String {
        self.scanner.scan(doc)
    }
}

impl<P, S, F: Fax> Fax for MultiFunctionDevice<P, S, F> {
    fn fax(&self, doc: &Document) -> String {
        self.fax.fax(doc)
    }
}

fn report(result: Result<String, DeviceError>) {
    match result {
        Ok(line) => println!("{line}"),
        Err(err) => println!("[err] {err}"),
    }
}

/// Runs every operation a full `Machine` promises.
pub fn use_all(machine: &dyn Machine, doc: &Document) -> error::Result<Vec<String>> {
    Ok(vec![machine.print(doc)?, machine.scan(doc)?, machine.fax(doc)?])
}

pub fn run() -> error::Result<()> {
    console::demo("Interface Segregation");

    let doc = Document::new("Document1");

    for line in use_all(&MultiFunctionPrinter, &doc)? {
        println!("{line}");
    }

    let old = OldFashionedPrinter;
    report(old.print(&doc));
    report(old.scan(&doc));
    report(old.fax(&doc));

    let device = MultiFunctionDevice::new(SimplePrinter, SimpleScanner, SimpleFax);
    println!("{}", Printer::print(&device, &doc));
    println!("{}", Scanner::scan(&device, &doc));
    println!("{}", Fax::fax(&device, &doc));
    Ok(())
}
