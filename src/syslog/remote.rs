use super::{Facility, Transport};
use crate::misc;
use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::process;

/// A connection to a remote syslog daemon.
///
/// Messages are sent as RFC 3164 style frames, one per message.
pub(super) struct RemoteSyslog {
    transport: Transport,
    addr: String,
    conn: Option<Conn>,
    closed: bool,
    facility: Facility,
    hostname: String,
    tag: String,
}
impl RemoteSyslog {
    pub fn dial(transport: Transport, addr: &str, tag: &str, facility: Facility) -> io::Result<Self> {
        let conn = Conn::connect(transport, addr)?;
        Ok(RemoteSyslog {
            transport,
            addr: addr.to_owned(),
            conn: Some(conn),
            closed: false,
            facility,
            hostname: misc::hostname(),
            tag: tag.to_owned(),
        })
    }

    /// Sends a message, re-dialing once if the connection turned out to be broken.
    pub fn send(&mut self, severity: u8, message: &str) {
        if self.closed {
            return;
        }
        let frame = format_frame(
            self.facility.priority(severity),
            &misc::rfc3339_timestamp(),
            &self.hostname,
            &self.tag,
            process::id(),
            message,
        );
        if self.send_frame(frame.as_bytes()).is_ok() {
            return;
        }
        self.conn = Conn::connect(self.transport, &self.addr).ok();
        let _ = self.send_frame(frame.as_bytes());
    }

    pub fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        match self.conn.take() {
            Some(Conn::Tcp(stream)) => match stream.shutdown(Shutdown::Both) {
                Err(ref e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
                result => result,
            },
            Some(Conn::Udp(_)) | None => Ok(()),
        }
    }

    fn send_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        match self.conn {
            Some(Conn::Tcp(ref mut stream)) => stream.write_all(frame),
            Some(Conn::Udp(ref socket)) => socket.send(frame).map(|_| ()),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "not connected to the syslog daemon",
            )),
        }
    }
}

enum Conn {
    Tcp(TcpStream),
    Udp(UdpSocket),
}
impl Conn {
    fn connect(transport: Transport, addr: &str) -> io::Result<Self> {
        match transport {
            Transport::Tcp => TcpStream::connect(addr).map(Conn::Tcp),
            Transport::Udp => {
                let mut last_error = None;
                for peer in addr.to_socket_addrs()? {
                    match udp_connect(peer) {
                        Ok(socket) => return Ok(Conn::Udp(socket)),
                        Err(e) => last_error = Some(e),
                    }
                }
                Err(last_error.unwrap_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("could not resolve {:?}", addr),
                    )
                }))
            }
        }
    }
}

fn udp_connect(peer: SocketAddr) -> io::Result<UdpSocket> {
    let local: SocketAddr = if peer.is_ipv4() {
        ([0, 0, 0, 0], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(local)?;
    socket.connect(peer)?;
    Ok(socket)
}

/// Formats `<PRI>TIMESTAMP HOSTNAME TAG[PID]: MSG`, newline-terminated.
fn format_frame(
    priority: u8,
    timestamp: &str,
    hostname: &str,
    tag: &str,
    pid: u32,
    message: &str,
) -> String {
    let newline = if message.ends_with('\n') { "" } else { "\n" };
    format!(
        "<{}>{} {} {}[{}]: {}{}",
        priority, timestamp, hostname, tag, pid, message, newline
    )
}
